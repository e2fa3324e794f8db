//! End-to-end tests for the `fullflash` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn fullflash(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fullflash"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run fullflash")
}

#[test]
fn app_only_default_output() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("app.bin"), [0xAA, 0xBB, 0xCC, 0xDD]).unwrap();

    let output = fullflash(dir.path(), &["--app", "app.bin"]);
    assert!(output.status.success(), "{output:?}");

    let image = fs::read(dir.path().join("full_flash.bin")).unwrap();
    assert_eq!(image.len(), 0x10004);
    assert!(image[..0x10000].iter().all(|&b| b == 0xFF));
    assert_eq!(&image[0x10000..], &[0xAA, 0xBB, 0xCC, 0xDD]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Creating full_flash.bin"));
    assert!(stdout.contains(" - app -> 0x10000 size 4"));
    assert!(stdout.contains("Wrote full_flash.bin size 65540"));
    assert!(stdout.contains("write_flash 0x0 full_flash.bin"));
}

#[test]
fn add_header_stamps_signature() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("app.bin"), [0xAA, 0xBB, 0xCC, 0xDD]).unwrap();

    let output = fullflash(
        dir.path(),
        &["--app", "app.bin", "--out", "img.bin", "--add-header"],
    );
    assert!(output.status.success(), "{output:?}");

    let image = fs::read(dir.path().join("img.bin")).unwrap();
    assert_eq!(&image[..8], &[0x1D, 0x04, 0xDB, 0xAE, 0x1D, 0x04, 0xDB, 0xAE]);
    assert!(image[8..0x10000].iter().all(|&b| b == 0xFF));
    assert_eq!(&image[0x10000..], &[0xAA, 0xBB, 0xCC, 0xDD]);
}

#[test]
fn boot_and_app_at_default_offsets() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("boot.bin"), [0x01]).unwrap();
    fs::write(dir.path().join("app.bin"), [0x02]).unwrap();

    let output = fullflash(dir.path(), &["--boot", "boot.bin", "--app", "app.bin"]);
    assert!(output.status.success(), "{output:?}");

    let image = fs::read(dir.path().join("full_flash.bin")).unwrap();
    assert_eq!(image.len(), 0x10001);
    assert_eq!(image[0x1000], 0x01);
    assert_eq!(image[0x10000], 0x02);
    assert!(image
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != 0x1000 && i != 0x10000)
        .all(|(_, &b)| b == 0xFF));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(" - boot -> 0x1000 size 1"));
}

#[test]
fn custom_offsets_in_hex_and_decimal() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("part.bin"), [0x33; 2]).unwrap();
    fs::write(dir.path().join("app.bin"), [0x44; 2]).unwrap();

    let output = fullflash(
        dir.path(),
        &[
            "--partition",
            "part.bin",
            "--part-off",
            "16",
            "--app",
            "app.bin",
            "--app-off",
            "0x20",
        ],
    );
    assert!(output.status.success(), "{output:?}");

    let image = fs::read(dir.path().join("full_flash.bin")).unwrap();
    assert_eq!(image.len(), 0x22);
    assert_eq!(&image[16..18], &[0x33, 0x33]);
    assert_eq!(&image[0x20..], &[0x44, 0x44]);
}

#[test]
fn missing_app_fails_without_output() {
    let dir = TempDir::new().unwrap();

    let output = fullflash(dir.path(), &["--app", "missing.bin"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("app binary not found at missing.bin"), "{stderr}");
    assert!(!dir.path().join("full_flash.bin").exists());
}

#[test]
fn missing_boot_warns_and_continues() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("app.bin"), [0x02]).unwrap();

    let output = fullflash(dir.path(), &["--boot", "missing.bin", "--app", "app.bin"]);
    assert!(output.status.success(), "{output:?}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("boot not found at missing.bin"), "{stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains(" - boot"));

    let image = fs::read(dir.path().join("full_flash.bin")).unwrap();
    assert_eq!(image.len(), 0x10001);
    assert!(image[..0x10000].iter().all(|&b| b == 0xFF));
    assert_eq!(image[0x10000], 0x02);
}

#[test]
fn unwritable_destination_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("app.bin"), [0x02]).unwrap();

    let output = fullflash(
        dir.path(),
        &["--app", "app.bin", "--out", "no_such_dir/out.bin"],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to write"), "{stderr}");
}

#[test]
fn overlapping_components_warn_and_last_wins() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("boot.bin"), [0x01; 8]).unwrap();
    fs::write(dir.path().join("app.bin"), [0xAA; 4]).unwrap();

    let output = fullflash(
        dir.path(),
        &["--boot", "boot.bin", "--boot-off", "0x10002", "--app", "app.bin"],
    );
    assert!(output.status.success(), "{output:?}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("app overwrites boot in range 0x10002..0x10004"),
        "{stderr}"
    );

    let image = fs::read(dir.path().join("full_flash.bin")).unwrap();
    assert_eq!(image.len(), 0x1000A);
    assert_eq!(&image[0x10000..0x10004], &[0xAA; 4]);
    assert_eq!(&image[0x10004..], &[0x01; 6]);
}

#[test]
fn oversized_image_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("app.bin"), [0x02]).unwrap();

    let output = fullflash(
        dir.path(),
        &["--app", "app.bin", "--app-off", "0x7fffffffffffff00"],
    );
    assert_eq!(output.status.code(), Some(1), "{output:?}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not fit"), "{stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Components:"), "{stdout}");
    assert!(!dir.path().join("full_flash.bin").exists());
}
