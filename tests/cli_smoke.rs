use std::path::PathBuf;

use serde_json::json;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_gradient-synth")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "gradient-synth.exe"
            } else {
                "gradient-synth"
            });
            p
        })
}

#[test]
fn cli_render_writes_png_from_document() {
    let dir = PathBuf::from("target").join("cli_smoke").join("doc");
    std::fs::create_dir_all(&dir).unwrap();

    let doc_path = dir.join("gradient.json");
    let out_path = dir.join("gradient.png");
    let _ = std::fs::remove_file(&out_path);

    let doc = json!({
        "gradient": { "colors": ["#0EA5E9", "#2563EB"], "angle_degrees": 30.0, "pattern": "wave" },
        "noise": { "enabled": true, "intensity": 0.4, "seed": 9 },
        "target": { "width": 64, "height": 48, "format": "png" }
    });
    std::fs::write(&doc_path, serde_json::to_vec_pretty(&doc).unwrap()).unwrap();

    let doc_arg = doc_path.to_string_lossy().to_string();
    let dir_arg = dir.to_string_lossy().to_string();

    let status = std::process::Command::new(exe())
        .args(["render", "--in", doc_arg.as_str(), "--out-dir"])
        .arg(dir_arg.as_str())
        .status()
        .unwrap();

    assert!(status.success());
    let img = image::open(&out_path).unwrap();
    assert_eq!((img.width(), img.height()), (64, 48));
}

#[test]
fn cli_render_flags_write_jpeg() {
    let dir = PathBuf::from("target").join("cli_smoke").join("flags");
    let _ = std::fs::remove_dir_all(&dir);
    let dir_arg = dir.to_string_lossy().to_string();

    let status = std::process::Command::new(exe())
        .args([
            "render",
            "--preset",
            "sunset",
            "--pattern",
            "conic",
            "--angle",
            "-30",
            "--width",
            "40",
            "--height",
            "20",
            "--format",
            "jpeg",
            "--serial",
            "--out-dir",
        ])
        .arg(dir_arg.as_str())
        .status()
        .unwrap();

    assert!(status.success());
    let bytes = std::fs::read(dir.join("gradient.jpeg")).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
}

#[test]
fn cli_css_prints_declaration() {
    let out = std::process::Command::new(exe())
        .args(["css", "--colors", "#1F2937,#9CA3AF", "--angle", "0"])
        .output()
        .unwrap();

    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap().trim(),
        "background: linear-gradient(90deg, #1f2937 0%, #9ca3af 100%);"
    );
}

#[test]
fn cli_rejects_six_colors() {
    let out = std::process::Command::new(exe())
        .args(["css", "--colors", "#000,#111,#222,#333,#444,#555"])
        .output()
        .unwrap();

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid spec"));
}
