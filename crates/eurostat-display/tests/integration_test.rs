//! Integration tests for the eurostat-display crate.
//!
//! These exercise the public map and comparison operations end to end.

use eurostat_common::test_utils::{assert_approx_eq, init_test_logging, series_fixtures};
use eurostat_display::{
    render_comparison, render_map, render_maps, AxisOptions, Basemap, ComparisonOptions, Figure,
    GeoGrid, Location, MapOptions, MapsOptions, Panel, TimeSeries,
};

fn density_grid() -> GeoGrid {
    GeoGrid::new(
        vec![48.0, 50.0, 52.0],
        vec![2.0, 4.0, 6.0],
        vec![5.0, 80.0, 150.0, 220.0, 900.0, 4000.0, 12.0, f64::NAN, 60.0],
    )
    .unwrap()
    .with_units("persons/km2")
}

#[test]
fn test_render_map_clamps_at_default_max() {
    init_test_logging();

    let canvas = render_map(&density_grid(), &MapOptions::default(), None).unwrap();
    let raster = canvas.rasters().next().unwrap();

    assert_eq!(raster.scale.min, 5.0);
    assert_eq!(raster.scale.max, 200.0);
    assert_eq!(raster.color_of(220.0), raster.color_of(4000.0));
    assert_ne!(raster.color_of(5.0), raster.color_of(150.0));
}

#[test]
fn test_render_map_with_location_and_extent() {
    let options = MapOptions {
        location: Some(Location::new(4.35, 50.85)),
        extent: Some(eurostat_display::Extent::new(-10.0, 30.0, 35.0, 70.0).unwrap()),
        axis: AxisOptions::new().title("Brussels"),
        ..MapOptions::default()
    };
    let canvas = render_map(&density_grid(), &options, None).unwrap();

    assert_eq!(canvas.markers().count(), 1);
    assert!(canvas.extent().is_some());
    assert_eq!(canvas.axis_options().title.as_deref(), Some("Brussels"));
}

#[test]
fn test_render_maps_three_panels_one_option() {
    let grids = [density_grid(), density_grid(), density_grid()];
    let options = MapsOptions {
        per_axis: vec![AxisOptions::new().title("2018")],
        ..MapsOptions::default()
    };

    let figure = render_maps(&grids, &options).unwrap();
    assert_eq!(figure.panels().len(), 3);

    for (index, panel) in figure.panels().iter().enumerate() {
        let Panel::Map(canvas) = panel else {
            panic!("expected a map panel");
        };
        if index == 0 {
            assert_eq!(canvas.axis_options().title.as_deref(), Some("2018"));
        } else {
            assert!(canvas.axis_options().is_empty());
        }
    }
}

#[test]
fn test_comparison_with_five_years_of_history() {
    let historical = TimeSeries::from_samples(
        (2015..2020).flat_map(|year| series_fixtures::daily_ramp(year, 0.002, 0.0)),
    )
    .with_units("m");
    let current = TimeSeries::from_samples(series_fixtures::hourly_constant(2023, 30, 0.0001));

    let chart = render_comparison(&current, &historical, &ComparisonOptions::default()).unwrap();

    assert_eq!(chart.year_count(), 5);
    assert!(chart.band().iter().take(365).all(|point| point.years == 5));

    let (first_day, first_total) = chart.current()[0];
    assert_eq!(first_day, 1);
    assert_approx_eq(first_total, 2.4, 1e-9);

    // identical years collapse the band onto the mean
    let day_100 = chart.band()[99];
    assert_approx_eq(day_100.lower, day_100.upper, 1e-9);
    assert_approx_eq(day_100.mean, 200.0, 1e-9);
}

#[test]
fn test_map_figure_renders_to_svg() {
    let mut canvas = render_map(&density_grid(), &MapOptions::default(), None).unwrap();
    canvas.set_colorbar(false);

    let svg = Figure::from(canvas).render_svg(&Basemap::default()).unwrap();
    assert!(svg.contains("<polygon"));
}

#[test]
fn test_map_outlines_come_from_basemap_files() {
    let dir = tempfile::tempdir().unwrap();
    let coastlines = dir.path().join("coastlines.geojson");
    let borders = dir.path().join("borders.geojson");
    std::fs::write(
        &coastlines,
        r#"{"type": "LineString", "coordinates": [[-5, 43], [3, 43], [10, 54]]}"#,
    )
    .unwrap();
    std::fs::write(
        &borders,
        r#"{"type": "LineString", "coordinates": [[6, 49], [8, 49]]}"#,
    )
    .unwrap();
    let basemap = Basemap::from_geojson_files(&coastlines, Some(&borders)).unwrap();

    let mut canvas = render_map(&density_grid(), &MapOptions::default(), None).unwrap();
    canvas.set_colorbar(false);
    let path = dir.path().join("map.svg");
    Figure::from(canvas).save(&path, &basemap).unwrap();

    let svg = std::fs::read_to_string(&path).unwrap();
    assert_eq!(svg.matches("<polyline").count(), 2);
    assert_eq!(svg.matches(r##"stroke="#000000""##).count(), 1);
    assert_eq!(svg.matches(r##"stroke="#696969""##).count(), 1);
}

#[test]
fn test_empty_basemap_leaves_outlines_blank() {
    init_test_logging();
    let mut canvas = render_map(&density_grid(), &MapOptions::default(), None).unwrap();
    canvas.set_colorbar(false);
    assert_eq!(canvas.layers().len(), 3);

    let svg = Figure::from(canvas).render_svg(&Basemap::default()).unwrap();
    assert_eq!(svg.matches("<polyline").count(), 0);
}

#[test]
fn test_comparison_series_in_svg() {
    let historical = TimeSeries::from_samples((2016..2019).flat_map(|year| {
        series_fixtures::daily_ramp(year, 0.0005 * f64::from(year - 2015), 0.0)
    }));
    let current = TimeSeries::from_samples(series_fixtures::hourly_constant(2023, 10, 0.0001));
    let mut chart =
        render_comparison(&current, &historical, &ComparisonOptions::default()).unwrap();
    chart.set_labels(false);
    let years = chart.year_count();
    assert_eq!(years, 3);

    let svg = Figure::from(chart).render_svg(&Basemap::default()).unwrap();

    // percentile band
    assert_eq!(svg.matches("<polygon").count(), 1);
    assert!(svg.contains(r##"<polygon opacity="0.2" fill="#808080""##));

    // one faint line per year, then the mean and the current profile
    assert_eq!(svg.matches("<polyline").count(), years + 2);
    assert_eq!(svg.matches(r##"opacity="0.05" stroke="#FF0000""##).count(), years);
    assert_eq!(svg.matches(r##"opacity="1" stroke="#FF0000""##).count(), 1);
    assert_eq!(svg.matches(r##"opacity="1" stroke="#0000FF""##).count(), 1);
}

#[test]
#[ignore = "needs system fonts"]
fn test_comparison_figure_saves_png() {
    let historical = TimeSeries::from_samples(series_fixtures::daily_ramp(2020, 0.003, 0.0));
    let current = TimeSeries::from_samples(series_fixtures::hourly_constant(2023, 10, 0.0002));
    let chart = render_comparison(&current, &historical, &ComparisonOptions::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("compare.png");
    Figure::from(chart).save(&path, &Basemap::default()).unwrap();
    assert!(path.exists());
}
