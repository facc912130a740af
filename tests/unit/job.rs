use std::io::Cursor;

use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "brandpost_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_png(path: &Path, w: u32, h: u32) {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, &buf).unwrap();
}

#[test]
fn normalize_rel_path_rejects_escape_and_absolute() {
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("fonts\\brand.ttf").unwrap(), "fonts/brand.ttf");
    assert!(normalize_rel_path("/etc/passwd").is_err());
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn minimal_job_uses_documented_defaults() {
    let job = PostJob::from_json_str(r#"{ "text": "Sale!" }"#).unwrap();
    assert_eq!(job.primary_color, "#FF0000");
    assert_eq!(job.secondary_color, "#000000");
    assert_eq!(job.preset, "square");
    assert_eq!(job.quality, 75);
    assert_eq!(job.style, DesignStyle::default());
    assert_eq!(job.geometry().unwrap().size().width, 1080);
}

#[test]
fn unknown_fields_and_presets_are_errors() {
    assert!(PostJob::from_json_str(r#"{ "txet": "typo" }"#).is_err());

    let job = PostJob::from_json_str(r#"{ "preset": "billboard" }"#).unwrap();
    assert!(matches!(job.geometry(), Err(PostError::Geometry(_))));
}

#[test]
fn custom_preset_table_replaces_builtin() {
    let job = PostJob::from_json_str(
        r#"{ "preset": "banner", "presets": [{ "name": "banner", "width": 1500, "height": 500 }] }"#,
    )
    .unwrap();
    let g = job.geometry().unwrap();
    assert_eq!((g.width(), g.height()), (1500, 500));
}

#[test]
fn load_reads_assets_relative_to_root() {
    let tmp = temp_dir("job_load");
    std::fs::create_dir_all(tmp.join("img")).unwrap();
    write_png(&tmp.join("img/bg.png"), 8, 4);

    let job = PostJob::from_json_str(
        r#"{ "background": "img/bg.png", "text": "Hi", "occasion": "", "preset": "landscape" }"#,
    )
    .unwrap();
    let loaded = job.load(&tmp).unwrap();
    assert!(loaded.notices.is_empty());
    assert!(loaded.request.background.is_some());
    assert_eq!(loaded.request.content.secondary, None);
    assert_eq!(loaded.request.geometry.size().height, 628);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_font_and_logo_files_become_notices() {
    let tmp = temp_dir("job_missing_optional");
    std::fs::create_dir_all(&tmp).unwrap();

    let job = PostJob::from_json_str(
        r#"{ "logo": "nope.png", "primary_font": "nope.ttf", "text": "Hi" }"#,
    )
    .unwrap();
    let loaded = job.load(&tmp).unwrap();
    let kinds: Vec<NoticeKind> = loaded.notices.iter().map(|n| n.kind).collect();
    assert_eq!(kinds, vec![NoticeKind::LogoSkipped, NoticeKind::FontFallback]);
    assert!(loaded.request.brand.logo.is_none());
    assert!(loaded.request.brand.primary_font.is_none());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_background_file_is_fatal() {
    let tmp = temp_dir("job_missing_bg");
    std::fs::create_dir_all(&tmp).unwrap();
    let job = PostJob::from_json_str(r#"{ "background": "gone.png" }"#).unwrap();
    let err = job.load(&tmp).unwrap_err();
    assert!(format!("{err:#}").contains("read background"));
    std::fs::remove_dir_all(&tmp).ok();
}
