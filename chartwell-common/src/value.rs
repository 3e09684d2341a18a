use serde::{Deserialize, Serialize};

/// A mark attribute that is either shared by every instance or given per instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarOrArray<T: Sync + Clone> {
    Scalar(T),
    Array(Vec<T>),
}

impl<T: Sync + Clone> ScalarOrArray<T> {
    pub fn new_scalar(value: T) -> Self {
        ScalarOrArray::Scalar(value)
    }

    pub fn new_array(values: Vec<T>) -> Self {
        ScalarOrArray::Array(values)
    }

    /// Number of distinct values, 1 for scalars
    pub fn len(&self) -> usize {
        match self {
            ScalarOrArray::Scalar(_) => 1,
            ScalarOrArray::Array(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_iter(&self, scalar_len: usize) -> Box<dyn Iterator<Item = &T> + '_> {
        match self {
            ScalarOrArray::Scalar(value) => Box::new(std::iter::repeat(value).take(scalar_len)),
            ScalarOrArray::Array(values) => Box::new(values.iter()),
        }
    }

    pub fn as_vec(&self, scalar_len: usize) -> Vec<T> {
        self.as_iter(scalar_len).cloned().collect::<Vec<_>>()
    }

    /// Returns the value for instance `index`, if there is one
    pub fn get(&self, index: usize) -> Option<&T> {
        match self {
            ScalarOrArray::Scalar(value) => Some(value),
            ScalarOrArray::Array(values) => values.get(index),
        }
    }

    pub fn map<U: Sync + Clone>(&self, f: impl Fn(&T) -> U) -> ScalarOrArray<U> {
        match self {
            ScalarOrArray::Scalar(value) => ScalarOrArray::Scalar(f(value)),
            ScalarOrArray::Array(values) => ScalarOrArray::Array(values.iter().map(f).collect()),
        }
    }
}

impl<T: Sync + Clone> From<Vec<T>> for ScalarOrArray<T> {
    fn from(values: Vec<T>) -> Self {
        ScalarOrArray::Array(values)
    }
}

impl<T: Sync + Clone> From<T> for ScalarOrArray<T> {
    fn from(value: T) -> Self {
        ScalarOrArray::Scalar(value)
    }
}

impl<T: Sync + Clone> From<&[T]> for ScalarOrArray<T> {
    fn from(values: &[T]) -> Self {
        ScalarOrArray::Array(values.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_broadcasts() {
        let v = ScalarOrArray::new_scalar(2.0f32);
        assert_eq!(v.as_vec(3), vec![2.0, 2.0, 2.0]);
        assert_eq!(v.len(), 1);
        assert_eq!(v.get(10), Some(&2.0));
    }

    #[test]
    fn test_array_ignores_scalar_len() {
        let v: ScalarOrArray<f32> = vec![1.0, 2.0].into();
        assert_eq!(v.as_vec(5), vec![1.0, 2.0]);
        assert_eq!(v.get(2), None);
        assert_eq!(v.map(|x| x * 2.0).as_vec(0), vec![2.0, 4.0]);
    }

    #[test]
    fn test_serde_shape() {
        let v: ScalarOrArray<f32> = 1.5.into();
        let s = serde_json::to_string(&v).unwrap();
        assert_eq!(s, r#"{"scalar":1.5}"#);
        let back: ScalarOrArray<f32> = serde_json::from_str(&s).unwrap();
        assert_eq!(back, v);
    }
}
