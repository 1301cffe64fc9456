//! Tests for loading and manipulating photo images.

use std::collections::HashSet;
use std::sync::Arc;

use horizon_tk::prelude::*;
use horizon_tk_core::testing::RecordingInterpreter;
use image::{Rgba, RgbaImage};

fn setup() -> (Arc<RecordingInterpreter>, Tk) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let interp = Arc::new(RecordingInterpreter::new());
    let tk = Tk::new(interp.clone());
    (interp, tk)
}

fn checkerboard() -> RgbaImage {
    RgbaImage::from_fn(4, 3, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 255, 128])
        }
    })
}

#[test]
fn test_load_png_decodes_and_transfers() {
    let (interp, tk) = setup();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.png");
    checkerboard().save(&path).unwrap();

    let image = tk.load_image(&path, &[ImageOpt::id("board")]).unwrap();
    assert_eq!(image.id(), "board");
    assert_eq!(image.size(), (4, 3));
    assert_eq!(image.to_image(), checkerboard());

    let scripts = interp.scripts();
    assert_eq!(scripts, vec!["image create photo board".to_string()]);
}

#[test]
fn test_load_gif_uses_interpreter_loader() {
    let (interp, tk) = setup();
    // The file does not exist: GIF loading never touches the disk here.
    let image = tk
        .load_image("/assets/Spinner.GIF", &[ImageOpt::gamma(0.8)])
        .unwrap();

    assert_eq!(
        interp.last_script().unwrap(),
        format!(
            "image create photo {} -gamma {{0.8}} -file {{/assets/Spinner.GIF}}",
            image.id()
        )
    );
}

#[test]
fn test_load_gif_path_with_spaces() {
    let (interp, tk) = setup();
    tk.load_image("my icons/busy.gif", &[ImageOpt::id("busy")])
        .unwrap();
    assert_eq!(
        interp.last_script().as_deref(),
        Some("image create photo busy -file {my icons/busy.gif}")
    );
}

#[test]
fn test_load_empty_path() {
    let (interp, tk) = setup();
    assert!(matches!(
        tk.load_image("", &[]),
        Err(TkError::InvalidArgument(_))
    ));
    assert!(interp.scripts().is_empty());
}

#[test]
fn test_load_missing_file() {
    let (interp, tk) = setup();
    let dir = tempfile::tempdir().unwrap();
    let result = tk.load_image(dir.path().join("missing.png"), &[]);
    assert!(matches!(result, Err(TkError::Decode(_))));
    assert!(interp.scripts().is_empty());
}

#[test]
fn test_load_corrupt_file() {
    let (_interp, tk) = setup();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"definitely not a png").unwrap();
    assert!(matches!(
        tk.load_image(&path, &[]),
        Err(TkError::Decode(_))
    ));
}

#[test]
fn test_load_create_failure() {
    let (interp, tk) = setup();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.png");
    checkerboard().save(&path).unwrap();

    interp.fail("image create photo", "image \"x\" already exists");
    assert!(matches!(
        tk.load_image(&path, &[ImageOpt::id("x")]),
        Err(TkError::Interp(_))
    ));
}

#[test]
fn test_generated_ids_unique() {
    let (_interp, tk) = setup();
    let ids: HashSet<String> = (0..50)
        .map(|_| tk.new_image(&[]).unwrap().id().to_string())
        .collect();
    assert_eq!(ids.len(), 50);
    assert!(ids.iter().all(|id| id.starts_with("horizon_image")));
}

#[test]
fn test_generated_ids_unique_across_threads() {
    let (_interp, tk) = setup();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tk = tk.clone();
            std::thread::spawn(move || {
                (0..25)
                    .map(|_| tk.new_image(&[]).unwrap().id().to_string())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: HashSet<String> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn test_custom_image_prefix() {
    let interp = Arc::new(RecordingInterpreter::new());
    let config = SessionConfig::new().image_id_prefix("thumb");
    let tk = Tk::with_config(interp, config).unwrap();
    assert_eq!(tk.new_image(&[]).unwrap().id(), "thumb1");
}

#[test]
fn test_zoomed_transfer() {
    let (_interp, tk) = setup();
    let image = tk.new_image(&[]).unwrap();
    image
        .set_zoomed_image(&checkerboard(), Zoom::uniform(3))
        .unwrap();
    assert_eq!(image.size(), (12, 9));

    let pixels = image.to_image();
    assert_eq!(pixels.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
    assert_eq!(pixels.get_pixel(3, 0), &Rgba([0, 0, 255, 128]));
}

#[test]
fn test_gamma_accessors() {
    let (interp, tk) = setup();
    let image = tk.new_image(&[ImageOpt::id("photo")]).unwrap();

    interp.respond("photo cget -gamma", "1.25");
    assert_eq!(image.gamma(), 1.25);

    image.set_gamma(0.5).unwrap();
    assert_eq!(
        interp.last_script().as_deref(),
        Some("photo configure -gamma {0.5}")
    );
}

#[test]
fn test_missing_photo_after_create() {
    let (interp, tk) = setup();
    interp.skip_photo_creation(true);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.png");
    checkerboard().save(&path).unwrap();

    assert!(matches!(
        tk.load_image(&path, &[]),
        Err(TkError::ImageNotFound(_))
    ));
}

#[test]
fn test_failed_transfer_deletes_photo() {
    let (interp, tk) = setup();
    interp.reject_pixel_puts(true);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.png");
    checkerboard().save(&path).unwrap();

    assert!(matches!(
        tk.load_image(&path, &[ImageOpt::id("board")]),
        Err(TkError::Interp(_))
    ));
    assert!(interp.photo_ids().is_empty());
    assert_eq!(interp.last_script().as_deref(), Some("image delete board"));
}

#[test]
fn test_failed_transfer_cleanup_failure_keeps_put_error() {
    let (interp, tk) = setup();
    interp.reject_pixel_puts(true);
    interp.fail("image delete", "image \"board\" doesn't exist");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.png");
    checkerboard().save(&path).unwrap();

    let err = tk.load_image(&path, &[ImageOpt::id("board")]).unwrap_err();
    match err {
        TkError::Interp(e) => assert!(e.message.contains("free memory")),
        other => panic!("unexpected error: {other:?}"),
    }
}
