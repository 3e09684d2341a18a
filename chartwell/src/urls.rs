//! Hyperlinks attached to chart entities, written into image maps.

use serde::{Deserialize, Serialize};

fn separator(prefix: &str) -> &'static str {
    if prefix.contains('?') {
        "&amp;"
    } else {
        "?"
    }
}

/// Explicit URLs, one list per series indexed by item
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomUrls {
    pub urls: Vec<Vec<String>>,
}

impl CustomUrls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_series(&mut self, urls: Vec<String>) {
        self.urls.push(urls);
    }

    pub fn url(&self, series: usize, item: usize) -> Option<String> {
        self.urls.get(series)?.get(item).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardXYUrlGenerator {
    pub prefix: String,
    pub series_parameter: String,
    pub item_parameter: String,
}

impl Default for StandardXYUrlGenerator {
    fn default() -> Self {
        Self::new("index.html")
    }
}

impl StandardXYUrlGenerator {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            series_parameter: "series".to_string(),
            item_parameter: "item".to_string(),
        }
    }

    pub fn generate(&self, series: usize, item: usize) -> String {
        format!(
            "{}{}{}={series}&amp;{}={item}",
            self.prefix,
            separator(&self.prefix),
            self.series_parameter,
            self.item_parameter
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum XYUrlGenerator {
    Standard(StandardXYUrlGenerator),
    Custom(CustomUrls),
}

impl XYUrlGenerator {
    pub fn generate(&self, series: usize, item: usize) -> Option<String> {
        match self {
            XYUrlGenerator::Standard(g) => Some(g.generate(series, item)),
            XYUrlGenerator::Custom(urls) => urls.url(series, item),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardCategoryUrlGenerator {
    pub prefix: String,
    pub series_parameter: String,
    pub category_parameter: String,
}

impl Default for StandardCategoryUrlGenerator {
    fn default() -> Self {
        Self::new("index.html")
    }
}

impl StandardCategoryUrlGenerator {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            series_parameter: "series".to_string(),
            category_parameter: "category".to_string(),
        }
    }

    pub fn generate(&self, row_key: &str, column_key: &str) -> String {
        format!(
            "{}{}{}={}&amp;{}={}",
            self.prefix,
            separator(&self.prefix),
            self.series_parameter,
            urlencoding::encode(row_key),
            self.category_parameter,
            urlencoding::encode(column_key)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CategoryUrlGenerator {
    Standard(StandardCategoryUrlGenerator),
    /// Indexed by row then column
    Custom(CustomUrls),
}

impl CategoryUrlGenerator {
    pub fn generate(
        &self,
        row: usize,
        column: usize,
        row_key: &str,
        column_key: &str,
    ) -> Option<String> {
        match self {
            CategoryUrlGenerator::Standard(g) => Some(g.generate(row_key, column_key)),
            CategoryUrlGenerator::Custom(urls) => urls.url(row, column),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardPieUrlGenerator {
    pub prefix: String,
    pub category_parameter: String,
    pub index_parameter: String,
}

impl Default for StandardPieUrlGenerator {
    fn default() -> Self {
        Self::new("index.html")
    }
}

impl StandardPieUrlGenerator {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            category_parameter: "category".to_string(),
            index_parameter: "pieIndex".to_string(),
        }
    }

    pub fn generate(&self, key: &str, pie_index: usize) -> String {
        format!(
            "{}{}{}={}&amp;{}={pie_index}",
            self.prefix,
            separator(&self.prefix),
            self.category_parameter,
            urlencoding::encode(key),
            self.index_parameter
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PieUrlGenerator {
    Standard(StandardPieUrlGenerator),
    /// Single list indexed by section
    Custom(CustomUrls),
}

impl PieUrlGenerator {
    pub fn generate(&self, index: usize, key: &str) -> Option<String> {
        match self {
            PieUrlGenerator::Standard(g) => Some(g.generate(key, 0)),
            PieUrlGenerator::Custom(urls) => urls.url(0, index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xy_url() {
        let generator = StandardXYUrlGenerator::new("xy.html");
        assert_eq!(generator.generate(1, 4), "xy.html?series=1&amp;item=4");

        let generator = StandardXYUrlGenerator::new("xy.html?chart=a");
        assert_eq!(
            generator.generate(0, 0),
            "xy.html?chart=a&amp;series=0&amp;item=0"
        );
    }

    #[test]
    fn test_category_url_encodes_keys() {
        let generator = StandardCategoryUrlGenerator::new("bar.html");
        assert_eq!(
            generator.generate("Series 1", "Q1&Q2"),
            "bar.html?series=Series%201&amp;category=Q1%26Q2"
        );
    }

    #[test]
    fn test_pie_and_custom_urls() {
        let pie = PieUrlGenerator::Standard(StandardPieUrlGenerator::default());
        assert_eq!(
            pie.generate(2, "Other").as_deref(),
            Some("index.html?category=Other&amp;pieIndex=0")
        );

        let mut urls = CustomUrls::new();
        urls.add_series(vec!["a.html".to_string(), "b.html".to_string()]);
        let custom = XYUrlGenerator::Custom(urls);
        assert_eq!(custom.generate(0, 1).as_deref(), Some("b.html"));
        assert_eq!(custom.generate(0, 2), None);
        assert_eq!(custom.generate(1, 0), None);
    }
}
