#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]

//! Measures lookup probe lengths of `ProbingHashMap` for each bundled hash function across a
//! sweep of load factors, and plots the results.

use plotters::prelude::*;
use quadmap::{HashFn, ProbingHashMap, hash_function_1, hash_function_2, next_prime, std_hash};
use rand::{Rng, distr::Alphanumeric};

// Stays prime so the table never grows during a run
const TABLE_SIZE: usize = 100_003;
// Load factors from 0.05 up to just under the 0.5 growth threshold
const NUM_LOAD_FACTORS: usize = 10;
const MIN_LOAD: f64 = 0.05;
const MAX_LOAD: f64 = 0.49;
const KEY_LENGTH: usize = 8;

const METHODS: [(&str, HashFn); 3] = [
    ("Code Point Sum", hash_function_1),
    ("Position Weighted Sum", hash_function_2),
    ("std DefaultHasher", std_hash),
];

/// Average and worst probe counts for one hash function at one load factor
#[derive(Debug, Clone, Copy)]
struct ProbeStats {
    average: f64,
    worst: usize,
}

fn measure(hash_fn: HashFn, keys: &[String]) -> ProbeStats {
    let mut map = ProbingHashMap::new(TABLE_SIZE, hash_fn);
    for (value, key) in keys.iter().enumerate() {
        map.put(key.clone(), value);
    }
    assert_eq!(map.capacity(), TABLE_SIZE, "table grew during measurement");

    let probes: Vec<usize> = keys.iter().map(|key| map.probe_count(key)).collect();
    let average = probes.iter().sum::<usize>() as f64 / probes.len().max(1) as f64;
    let worst = probes.iter().copied().max().unwrap_or(0);
    ProbeStats { average, worst }
}

fn draw_chart(
    file_name: &str,
    caption: &str,
    y_desc: &str,
    load_factors: &[f64],
    series: &[Vec<f64>],
) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";
    let colors = [RGBColor(220, 50, 50), RGBColor(50, 90, 220), RGBColor(50, 180, 50)];

    let root = BitMapBackend::new(file_name, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = series.iter().flatten().fold(0.0_f64, |max, &y| max.max(y)) * 1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(MIN_LOAD..MAX_LOAD, 0.0..max_y.max(1.0))?;

    chart
        .configure_mesh()
        .x_desc("Load Factor")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    for (method_idx, (method, _)) in METHODS.iter().enumerate() {
        let color = colors[method_idx % colors.len()];
        let line_style = ShapeStyle::from(&color).stroke_width(2);
        let points: Vec<(f64, f64)> =
            load_factors.iter().copied().zip(series[method_idx].iter().copied()).collect();

        chart
            .draw_series(LineSeries::new(points.clone(), line_style))?
            .label(*method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
        chart.draw_series(points.into_iter().map(|point| Circle::new(point, 4, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(next_prime(TABLE_SIZE), Some(TABLE_SIZE));

    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| MIN_LOAD + (MAX_LOAD - MIN_LOAD) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();
    let num_keys: Vec<usize> =
        load_factors.iter().map(|&load| (TABLE_SIZE as f64 * load) as usize).collect();

    println!("Load factors: {:?}", load_factors);
    println!("Number of keys: {:?}", num_keys);

    // Generate random keys once so every hash function sees the same input
    let mut rng = rand::rng();
    let max_keys_needed = num_keys.iter().copied().max().unwrap_or(0);
    let keys: Vec<String> = (0..max_keys_needed)
        .map(|_| (&mut rng).sample_iter(&Alphanumeric).take(KEY_LENGTH).map(char::from).collect())
        .collect();

    let mut average_probes: Vec<Vec<f64>> = vec![Vec::new(); METHODS.len()];
    let mut worst_case_probes: Vec<Vec<f64>> = vec![Vec::new(); METHODS.len()];

    for &n_keys in &num_keys {
        println!("Testing with {} keys", n_keys);

        for (method_idx, &(method, hash_fn)) in METHODS.iter().enumerate() {
            let stats = measure(hash_fn, &keys[..n_keys]);
            average_probes[method_idx].push(stats.average);
            worst_case_probes[method_idx].push(stats.worst as f64);

            println!("  {}: Avg probes = {:.2}, Worst = {}", method, stats.average, stats.worst);
        }
    }

    draw_chart(
        "average_probes.png",
        "Average Lookup Probes by Hash Function",
        "Average Probes",
        &load_factors,
        &average_probes,
    )?;
    draw_chart(
        "worst_case_probes.png",
        "Worst-Case Lookup Probes by Hash Function",
        "Worst-Case Probes",
        &load_factors,
        &worst_case_probes,
    )?;

    println!("Generated plot images: average_probes.png, worst_case_probes.png");

    Ok(())
}
