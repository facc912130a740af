use super::*;

fn tree(svg: &str) -> usvg::Tree {
    usvg::Tree::from_data(svg.as_bytes(), &usvg::Options::default()).unwrap()
}

#[test]
fn rasterizes_at_requested_size() {
    let t = tree(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="5"><rect width="10" height="5" fill="#00ff00"/></svg>"##,
    );
    let r = rasterize_svg(&t, 40, 20).unwrap();
    assert_eq!((r.width(), r.height()), (40, 20));
    assert_eq!(r.pixel(20, 10), [0, 255, 0, 255]);
}

#[test]
fn uncovered_area_stays_transparent() {
    let t = tree(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="5" height="10" fill="black"/></svg>"#,
    );
    let r = rasterize_svg(&t, 10, 10).unwrap();
    assert_eq!(r.pixel(1, 5)[3], 255);
    assert_eq!(r.pixel(8, 5), [0, 0, 0, 0]);
}

#[test]
fn zero_size_is_rejected() {
    let t = tree(r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"></svg>"#);
    assert!(rasterize_svg(&t, 0, 10).is_err());
}
