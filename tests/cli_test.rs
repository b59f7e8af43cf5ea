//! 執行檔測試 - 驗證錯誤輸出與結束狀態

use std::process::Command;

/// 來源影片不存在：結束狀態非零，錯誤只輸出一次
#[test]
fn test_missing_video_reports_error_once() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(
        temp.path().join("settings.json"),
        r#"{ "video_path": "does_not_exist.mp4" }"#,
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_scene_splitter"))
        .current_dir(temp.path())
        .env("RUST_LOG", "off")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("does_not_exist.mp4").count(), 1, "{stderr}");
    assert!(stderr.contains("錯誤:"), "{stderr}");
    assert!(!stderr.contains("Error:"), "{stderr}");
    assert!(!temp.path().join("clips").exists());
}
