use super::*;

#[test]
fn default_three_layer_canvas() {
    let g = Geometry::new(3, 1);
    assert_eq!(g.pole_height, 70);
    assert_eq!(g.max_radius, 70);
    assert_eq!(
        g.canvas(),
        Canvas {
            width: 2 * 10 + 4 * 40 + 6 * 70,
            height: 30 + 70 + 5 + 30 + 40 + 10,
        }
    );
    assert_eq!(g.canvas().width, 600);
    assert_eq!(g.canvas().height, 185);
}

#[test]
fn scaling_is_linear() {
    let a = Geometry::new(5, 1).canvas();
    let b = Geometry::new(5, 3).canvas();
    assert_eq!(b.width, a.width * 3);
    assert_eq!(b.height, a.height * 3);
}

#[test]
fn geometry_is_a_pure_function() {
    assert_eq!(Geometry::new(10, 2), Geometry::new(10, 2));
    assert_ne!(Geometry::new(10, 2), Geometry::new(11, 2));
}

#[test]
fn poles_are_evenly_spaced() {
    let g = Geometry::new(3, 1);
    assert_eq!(g.pole_x(0), 120.0);
    assert_eq!(g.pole_x(1), 300.0);
    assert_eq!(g.pole_x(2), 480.0);
    assert_eq!(g.pole_x(1) * 2.0, g.width as f64);
}

#[test]
fn bottom_slot_sits_on_the_ground() {
    let g = Geometry::new(3, 1);
    let bottom = g.disk_shape(0, 2, 5);
    assert_eq!(bottom.rect().y1, g.base_y());
    let top = g.disk_shape(0, 0, 1);
    assert_eq!(top.rect().y0, g.base_y() - 3.0 * 20.0);
    assert!(top.rect().y0 > g.pole_top_y());
}

#[test]
fn disk_width_grows_with_radius_and_fits_its_peg_area() {
    let g = Geometry::new(4, 2);
    let small = g.disk_shape(1, 3, 1).rect();
    let large = g.disk_shape(1, 3, 7).rect();
    assert!(large.width() > small.width());
    assert_eq!(large.height(), g.disk_height as f64);
    assert_eq!(large.width(), 2.0 * (7.0 * 20.0 + 20.0 + 20.0));
    assert!(large.width() / 2.0 <= g.max_radius as f64 + g.cap_radius());
}

#[test]
fn pole_rises_from_ground_line() {
    let g = Geometry::new(6, 1);
    let line = g.pole_line(2);
    assert_eq!(line.p0.y, g.base_y());
    assert_eq!(line.p0.y - line.p1.y, g.pole_height as f64);
    assert_eq!(g.ground_rect().height(), g.ground as f64);
}
