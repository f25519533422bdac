use super::*;
use crate::assets::theme::Theme;

#[test]
fn set_covers_every_theme_candidate() {
    for theme in Theme::KNOWN {
        for name in theme.background_candidates() {
            assert!(
                BACKGROUND_SET.iter().any(|s| s.file == *name),
                "{theme}: {name} missing"
            );
        }
    }
}

#[test]
fn writes_decodable_files_into_new_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("backgrounds");
    let canvas = Canvas::new(24, 24).unwrap();

    let written = write_background_set(&dir, canvas).unwrap();
    assert_eq!(written.len(), BACKGROUND_SET.len());
    for path in &written {
        let img = image::open(path).unwrap();
        assert_eq!((img.width(), img.height()), (24, 24));
    }
}

#[test]
fn png_extension_is_lossless() {
    let tmp = tempfile::tempdir().unwrap();
    let spec = BackgroundSpec {
        file: "flat.png",
        from: Rgba8::new(10, 20, 30, 255),
        to: Rgba8::new(10, 20, 30, 255),
        kind: GradientKind::Linear,
    };
    let path = write_background(tmp.path(), &spec, Canvas::new(4, 4).unwrap()).unwrap();
    let img = image::open(&path).unwrap().to_rgb8();
    assert!(img.pixels().all(|p| p.0 == [10, 20, 30]));
}
