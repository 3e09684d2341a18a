use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chartwell::chart_factory::{
    create_bar_chart, create_box_and_whisker_chart, create_bubble_chart, create_gantt_chart,
    create_line_chart, create_meter_chart, create_pie_chart, create_xy_line_chart, ChartOptions,
};
use chartwell::imagemap::{image_map, ToolTipFragment, UrlFragment};
use chartwell::plot::MeterInterval;
use chartwell::{Chart, ChartTheme, Plot};
use chartwell_common::range::Range;
use chartwell_common::types::{colors, ColorOrGradient};
use chartwell_data::box_whisker::DefaultBoxAndWhiskerCategoryDataset;
use chartwell_data::category::DefaultCategoryDataset;
use chartwell_data::gantt::{Task, TaskSeries, TaskSeriesCollection};
use chartwell_data::pie::DefaultPieDataset;
use chartwell_data::time::SimpleTimePeriod;
use chartwell_data::value::DefaultValueDataset;
use chartwell_data::xy::{XYSeries, XYSeriesCollection};
use chartwell_data::xyz::DefaultXYZDataset;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Render chart description files to scene graphs and HTML image maps
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a chart JSON file
    Render {
        /// Path to the chart file written by `sample` or `Chart::to_json`
        chart: PathBuf,

        #[arg(long, default_value_t = 600.0)]
        width: f32,

        #[arg(long, default_value_t = 400.0)]
        height: f32,

        /// Theme to apply before rendering (standard, darkness or legacy)
        #[arg(long)]
        theme: Option<String>,

        /// Crosshair anchor as X,Y in pixels
        #[arg(long, value_parser = parse_anchor)]
        anchor: Option<[f32; 2]>,

        /// Write the scene graph as JSON to this path
        #[arg(long)]
        scene: Option<PathBuf>,

        /// Write an HTML image map to this path
        #[arg(long)]
        image_map: Option<PathBuf>,

        #[arg(long, default_value = "chart")]
        map_name: String,
    },

    /// Print a sample chart file to stdout
    Sample {
        #[arg(value_enum)]
        kind: SampleKind,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SampleKind {
    Pie,
    Bar,
    Line,
    Xy,
    Gantt,
    Meter,
    Bubble,
    Box,
}

fn parse_anchor(value: &str) -> Result<[f32; 2], String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got `{value}`"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<f32>()
            .map_err(|e| format!("invalid coordinate `{s}`: {e}"))
    };
    Ok([parse(x)?, parse(y)?])
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Render {
            chart,
            width,
            height,
            theme,
            anchor,
            scene,
            image_map,
            map_name,
        } => render(
            &chart,
            width,
            height,
            theme.as_deref(),
            anchor,
            scene,
            image_map,
            &map_name,
        ),
        Commands::Sample { kind } => sample(kind).and_then(|chart| {
            println!("{}", chart.to_json()?);
            Ok(())
        }),
    };
    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn render(
    path: &Path,
    width: f32,
    height: f32,
    theme: Option<&str>,
    anchor: Option<[f32; 2]>,
    scene_path: Option<PathBuf>,
    map_path: Option<PathBuf>,
    map_name: &str,
) -> Result<()> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read chart file {}", path.display()))?;
    let mut chart = Chart::from_json(&json)
        .with_context(|| format!("failed to parse chart file {}", path.display()))?;
    if let Some(name) = theme {
        ChartTheme::by_name(name)?.apply(&mut chart);
    }

    let rendered = chart.draw(width, height, anchor)?;
    info!(
        "rendered {} plot with {} entities",
        chart.plot.type_name(),
        rendered.info.entities.len()
    );

    if let Some(scene_path) = &scene_path {
        let scene_json = serde_json::to_string_pretty(&rendered.scene)?;
        fs::write(scene_path, scene_json)
            .with_context(|| format!("failed to write {}", scene_path.display()))?;
    }
    if let Some(map_path) = &map_path {
        let map = image_map(
            map_name,
            &rendered.info,
            &ToolTipFragment::Standard,
            &UrlFragment::Standard,
        );
        fs::write(map_path, map)
            .with_context(|| format!("failed to write {}", map_path.display()))?;
    }
    if scene_path.is_none() && map_path.is_none() {
        let data_area = rendered.info.plot_info.data_area;
        println!(
            "{} chart: {} marks, {} entities, data area {}x{} at ({}, {})",
            chart.plot.type_name(),
            rendered.scene.marks.len(),
            rendered.info.entities.len(),
            data_area.width,
            data_area.height,
            data_area.x,
            data_area.y
        );
    }
    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow!("invalid date {year}-{month}-{day}"))
}

fn sample(kind: SampleKind) -> Result<Chart> {
    let options = ChartOptions::default();
    Ok(match kind {
        SampleKind::Pie => create_pie_chart(
            Some("Browser Share"),
            DefaultPieDataset::from_pairs([
                ("Firefox", 28.0),
                ("Chrome", 52.0),
                ("Safari", 14.0),
                ("Other", 6.0),
            ]),
            options,
        ),
        SampleKind::Bar | SampleKind::Line => {
            let mut data = DefaultCategoryDataset::new();
            for (row, values) in [("2023", [12.0, 15.0, 9.0, 17.0]), ("2024", [14.0, 18.0, 11.0, 21.0])] {
                for (column, value) in ["Q1", "Q2", "Q3", "Q4"].into_iter().zip(values) {
                    data.add_value(Some(value), row, column);
                }
            }
            if matches!(kind, SampleKind::Bar) {
                create_bar_chart(Some("Quarterly Sales"), Some("Quarter"), Some("Sales"), data, options)
            } else {
                create_line_chart(Some("Quarterly Sales"), Some("Quarter"), Some("Sales"), data, options)
            }
        }
        SampleKind::Xy => {
            let series = XYSeries::from_points(
                "Measured",
                (0..20).map(|i| {
                    let x = i as f64 * 0.5;
                    (x, x.sin() * 10.0 + x)
                }),
            )?;
            create_xy_line_chart(
                Some("Signal"),
                Some("Time"),
                Some("Level"),
                XYSeriesCollection::from_series(vec![series])?,
                options,
            )
        }
        SampleKind::Gantt => {
            let mut scheduled = TaskSeries::new("Scheduled");
            for (name, start, end, complete) in [
                ("Requirements", date(2024, 1, 1)?, date(2024, 1, 14)?, 1.0),
                ("Design", date(2024, 1, 10)?, date(2024, 2, 5)?, 0.6),
                ("Build", date(2024, 2, 1)?, date(2024, 3, 20)?, 0.1),
                ("Test", date(2024, 3, 10)?, date(2024, 4, 1)?, 0.0),
            ] {
                scheduled.add(
                    Task::new(name, Some(SimpleTimePeriod::from_dates(start, end)?))
                        .with_percent_complete(complete),
                );
            }
            let mut tasks = TaskSeriesCollection::new();
            tasks.add(scheduled)?;
            create_gantt_chart(Some("Project Plan"), Some("Task"), Some("Date"), tasks, options)
        }
        SampleKind::Meter => {
            let mut chart = create_meter_chart(
                Some("Engine Temperature"),
                DefaultValueDataset::new(Some(72.0)),
                options,
            );
            if let Plot::Meter(plot) = &mut chart.plot {
                plot.units = "C".to_string();
                for (label, lower, upper, color) in [
                    ("Normal", 0.0, 60.0, colors::GREEN),
                    ("Warning", 60.0, 85.0, colors::YELLOW),
                    ("Critical", 85.0, 100.0, colors::RED),
                ] {
                    plot.add_interval(
                        MeterInterval::new(label, Range::try_new(lower, upper)?)
                            .with_background(ColorOrGradient::Color(color)),
                    );
                }
            }
            chart
        }
        SampleKind::Bubble => {
            let mut data = DefaultXYZDataset::new();
            data.add_series(
                "Cities",
                vec![2.1, 4.5, 6.3, 8.0],
                vec![3.0, 7.5, 4.2, 9.1],
                vec![1.0, 2.5, 1.5, 3.0],
            )?;
            create_bubble_chart(Some("Population"), Some("Area"), Some("Density"), data, options)
        }
        SampleKind::Box => {
            let mut data = DefaultBoxAndWhiskerCategoryDataset::new();
            let samples: [(&str, &str, &[f64]); 3] = [
                ("Run", "A", &[4.2, 5.1, 5.5, 6.0, 6.3, 7.9, 12.4]),
                ("Run", "B", &[3.1, 3.8, 4.0, 4.4, 5.2, 5.9]),
                ("Run", "C", &[6.5, 7.0, 7.7, 8.1, 8.4, 9.9]),
            ];
            for (row, column, values) in samples {
                data.add_values(values, row, column)?;
            }
            create_box_and_whisker_chart(Some("Timings"), Some("Build"), Some("Seconds"), data, options)
        }
    })
}
