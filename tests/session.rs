//! A whole editing session driven through the host seams.

use nalgebra as na;
use search_box3d::{
    draw_box, draw_grid, emit_box_settings, erase_box, grid_preview, BoundingExtent, Color,
    ExtentSource, GridSpacing, MarkerColors, Reconciliation, Representation, SearchBox,
    SearchBoxConfig, VertexLabel, GRID_OBJECT,
};
use std::collections::BTreeMap;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Default)]
struct Viewer {
    selection: Option<BoundingExtent>,
    atoms: BTreeMap<String, BTreeMap<String, (na::Point3<f64>, Color)>>,
    bonds: BTreeMap<String, usize>,
}

impl ExtentSource for Viewer {
    fn selection_extent(&self, selection: &str) -> Option<BoundingExtent> {
        if selection == "sele" {
            self.selection
        } else {
            None
        }
    }

    fn whole_extent(&self) -> BoundingExtent {
        BoundingExtent::new(na::Point3::new(0.0, 0.0, 0.0), na::Point3::new(40.0, 30.0, 20.0))
    }
}

impl Representation for Viewer {
    fn vertex_colors(&self, object: &str) -> Vec<(String, Color)> {
        self.atoms
            .get(object)
            .into_iter()
            .flatten()
            .map(|(name, (_, color))| (name.clone(), color.clone()))
            .collect()
    }

    fn delete(&mut self, object: &str) {
        self.atoms.remove(object);
        self.bonds.remove(object);
    }

    fn add_vertex(&mut self, object: &str, name: &str, position: na::Point3<f64>, color: Color) {
        self.atoms
            .entry(object.to_string())
            .or_default()
            .insert(name.to_string(), (position, color));
    }

    fn bond(&mut self, object: &str, _from: &str, _to: &str) {
        *self.bonds.entry(object.to_string()).or_default() += 1;
    }
}

#[test]
fn draw_edit_repad_emit_and_clear() {
    init_tracing();

    let config = SearchBoxConfig::default();
    let mut viewer = Viewer::default();
    let mut search_box = SearchBox::with_config(&config);

    // Nothing selected: the box covers the whole structure.
    let extent = viewer.extent_for_reset(&config.selection);
    search_box.reset(&extent, config.padding);
    draw_box(
        &mut viewer,
        &config.object_name,
        &search_box.vertices(),
        &config.neutral_color,
        &MarkerColors::Axes,
    );

    assert_eq!(search_box.center(), na::Point3::new(20.0, 15.0, 10.0));
    assert_eq!(search_box.half_extents().neg_x, 23.5);
    assert_eq!(viewer.atoms["box"].len(), 13);
    assert_eq!(viewer.bonds["box"], 12);

    // Select a region and widen the padding.
    viewer.selection = Some(BoundingExtent::new(
        na::Point3::new(10.0, 10.0, 10.0),
        na::Point3::new(14.0, 12.0, 16.0),
    ));
    let fields = search_box.displayed_fields();
    let outcome = search_box.redraw(
        &fields,
        viewer.extent_for_redraw(&config.selection).as_ref(),
        4.0,
    );
    draw_box(
        &mut viewer,
        &config.object_name,
        &search_box.vertices(),
        &config.neutral_color,
        &MarkerColors::Axes,
    );

    assert_eq!(outcome, Reconciliation::Remeasured);
    assert_eq!(search_box.center(), na::Point3::new(12.0, 11.0, 13.0));
    assert_eq!(search_box.half_extents().pos_y, 5.0);

    let v8 = viewer.atoms["box"]["v8"].0;
    assert_eq!(v8, na::Point3::new(18.0, 16.0, 20.0));

    // Rotate by hand; the selection is ignored while fields differ.
    let mut fields = search_box.displayed_fields();
    fields.angle2_deg = 90.0;
    let outcome = search_box.redraw(
        &fields,
        viewer.extent_for_redraw(&config.selection).as_ref(),
        4.0,
    );
    assert_eq!(outcome, Reconciliation::DirectEdit);

    let text = emit_box_settings(Some(&search_box), &config.emission()).unwrap();
    assert!(text.contains("[SETTINGS.visiblebox.p1]\n\tx = 6.00\n\ty = 6.00\n\tz = 6.00\n"));
    assert!(text.contains("[SETTINGS.internalbox]"));

    search_box.clear();
    erase_box(&mut viewer, &config.object_name);
    assert!(search_box.is_empty());
    assert!(!viewer.atoms.contains_key("box"));
}

#[test]
fn grid_preview_sits_beside_the_box() {
    init_tracing();

    let mut config = SearchBoxConfig {
        spacing: GridSpacing::Medium,
        ..SearchBoxConfig::default()
    };
    let mut viewer = Viewer::default();

    let search_box = SearchBox::from_extent(&viewer.whole_extent(), config.padding);
    draw_box(
        &mut viewer,
        &config.object_name,
        &search_box.vertices(),
        &config.neutral_color,
        &MarkerColors::Axes,
    );

    let vertices = grid_preview(&viewer.whole_extent(), &config.emission()).unwrap();
    draw_grid(&mut viewer, &vertices);

    // Whole extent (0,0,0)-(40,30,20), step 0.5 and probe 4.0.
    let v1 = vertices.get(VertexLabel::V1);
    let v8 = vertices.get(VertexLabel::V8);
    assert!((v1 - na::Point3::new(-4.0, -4.0, -4.0)).norm() < 1e-9);
    assert!((v8 - na::Point3::new(44.5, 34.5, 24.5)).norm() < 1e-9);

    let white = Color::named("white");
    assert_eq!(viewer.atoms[GRID_OBJECT].len(), 13);
    assert!(viewer.atoms[GRID_OBJECT].values().all(|(_, color)| *color == white));
    assert_eq!(viewer.atoms["box"]["v2x"].1, Color::named("red"));

    config.spacing = GridSpacing::StepSize(0.0);
    assert!(grid_preview(&viewer.whole_extent(), &config.emission()).is_err());
}
