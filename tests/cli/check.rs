use anyhow::Result;

use crate::CliTest;

const SOURCE: &str = r#"package com.example;

class App {
    String greeting = "Hello";
}
"#;

#[test]
fn test_check_reports_bundle_creation() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("App.java", SOURCE)?;

    let output = test.check_command("App.java").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success(), "stdout:\n{}", stdout);
    assert!(stdout.contains("will be created"), "stdout:\n{}", stdout);
    Ok(())
}

#[test]
fn test_check_fails_on_conflicting_bundle_value() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("App.java", SOURCE)?;
    test.write_file("messages.properties", "App.0=Goodbye\n")?;

    let output = test.check_command("App.java").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(output.status.code(), Some(1), "stdout:\n{}", stdout);
    assert!(stdout.contains("fatal"), "stdout:\n{}", stdout);
    Ok(())
}

#[test]
fn test_check_nothing_to_externalize() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("App.java", "class App {\n}\n")?;

    let output = test.check_command("App.java").output()?;
    assert_eq!(output.status.code(), Some(1));
    Ok(())
}

#[test]
fn test_check_missing_file_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.check_command("Missing.java").output()?;
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}
