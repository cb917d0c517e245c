use serde_json::{json, Map, Value};

use super::types::{Figure, Restyle};
use crate::view::{BubbleSeries, RankedSeries};

/// Color ramp for the ten gauge bands, pale yellow through saturated green,
/// one band per scrub-per-week step.
const GAUGE_STEP_COLORS: [&str; 10] = [
    "#ffffa8", "#f1fa95", "#e2f583", "#d1f172", "#beec61", "#a9e851", "#92e441", "#76e031",
    "#52db20", "#00d70a",
];

const GAUGE_BAR_COLOR: &str = "#ee8844";

fn config() -> Value {
    // Hide the chart toolbar on all three panels.
    json!({ "displayModeBar": false })
}

/// Full figure for the top-10 horizontal bar panel.
pub fn ranked_figure(series: &RankedSeries) -> Figure {
    Figure {
        data: vec![json!({
            "x": series.values,
            "y": series.labels,
            "text": series.hover,
            "name": "Taxa",
            "type": "bar",
            "orientation": "h",
        })],
        layout: json!({
            "title": "Top 10 Samples",
            "margin": { "t": 30, "b": 40 },
            "xaxis": { "title": "Sample Values", "fixedrange": true },
            "yaxis": { "title": "Samples", "fixedrange": true },
        }),
        config: config(),
    }
}

/// Full figure for the bubble panel. Marker size tracks the observed value,
/// marker color the taxon id, on a blue-red gradient.
pub fn bubble_figure(series: &BubbleSeries) -> Figure {
    Figure {
        data: vec![json!({
            "x": series.otu_ids,
            "y": series.values,
            "text": series.labels,
            "mode": "markers",
            "marker": {
                "size": series.values,
                "color": series.otu_ids,
                "colorscale": "Bluered",
            },
        })],
        layout: json!({
            "title": "Values per OTU ID",
            "margin": { "t": 30, "b": 40, "l": 50, "r": 10, "pad": 6 },
            "xaxis": { "title": "OTU ID" },
            "yaxis": { "title": "Sample Values" },
        }),
        config: config(),
    }
}

/// Full figure for the wash-frequency gauge: 0-10 dial, tick every unit, ten
/// color-banded steps of width one.
pub fn gauge_figure(value: f64) -> Figure {
    let steps: Vec<Value> = GAUGE_STEP_COLORS
        .iter()
        .enumerate()
        .map(|(i, color)| json!({ "range": [i, i + 1], "color": color }))
        .collect();

    Figure {
        data: vec![json!({
            "value": value,
            "type": "indicator",
            "mode": "gauge+number",
            "gauge": {
                "axis": {
                    "dtick": 1,
                    "range": [Value::Null, 10],
                    "tickcolor": "black",
                    "ticks": "inside",
                },
                "bar": { "color": GAUGE_BAR_COLOR, "thickness": 0.5 },
                "bgcolor": "white",
                "borderwidth": 1,
                "bordercolor": "black",
                "steps": steps,
            },
        })],
        layout: json!({
            "title": "<b>Belly Button Washing Frequency</b><br>Scrubs per Week",
        }),
        config: config(),
    }
}

/// In-place patch for the bar panel. Restyle values are wrapped in
/// per-trace arrays.
pub fn ranked_restyle(series: &RankedSeries) -> Restyle {
    let mut patch = Map::new();
    patch.insert("x".to_string(), json!([series.values]));
    patch.insert("y".to_string(), json!([series.labels]));
    patch.insert("text".to_string(), json!([series.hover]));
    patch
}

/// In-place patch for the bubble panel, marker size and color included.
pub fn bubble_restyle(series: &BubbleSeries) -> Restyle {
    let mut patch = Map::new();
    patch.insert("x".to_string(), json!([series.otu_ids]));
    patch.insert("y".to_string(), json!([series.values]));
    patch.insert("text".to_string(), json!([series.labels]));
    patch.insert("marker.size".to_string(), json!([series.values]));
    patch.insert("marker.color".to_string(), json!([series.otu_ids]));
    patch
}

/// In-place patch for the gauge panel.
pub fn gauge_restyle(value: f64) -> Restyle {
    let mut patch = Map::new();
    patch.insert("value".to_string(), json!(value));
    patch
}
