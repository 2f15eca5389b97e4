use anyhow::Result;

use crate::CliTest;

const SOURCE: &str = r#"package com.example;

class App {
    String greeting = "Hello";
}
"#;

#[test]
fn test_externalize_dry_run_changes_nothing() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("App.java", SOURCE)?;

    let output = test.externalize_command("App.java").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success(), "stdout:\n{}", stdout);
    assert!(stdout.contains("dry run"), "stdout:\n{}", stdout);
    assert_eq!(test.read_file("App.java")?, SOURCE);
    assert!(!test.exists("messages.properties"));
    assert!(!test.exists("Messages.java"));
    Ok(())
}

#[test]
fn test_externalize_apply_rewrites_all_three_outputs() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("App.java", SOURCE)?;

    let mut cmd = test.externalize_command("App.java");
    cmd.arg("--apply");
    let output = cmd.output()?;
    let stdout = String::from_utf8(output.stdout)?;
    assert!(output.status.success(), "stdout:\n{}", stdout);

    let source = test.read_file("App.java")?;
    assert!(
        source.contains("Messages.getString(\"App.0\"); //$NON-NLS-1$"),
        "source:\n{}",
        source
    );

    let bundle = test.read_file("messages.properties")?;
    assert_eq!(bundle, "App.0=Hello\n");

    let accessor = test.read_file("Messages.java")?;
    assert!(accessor.contains("package com.example;"));
    assert!(accessor.contains("ResourceBundle.getBundle(RESOURCE_BUNDLE)"));
    assert!(accessor.contains("\"com.example.messages\""));
    Ok(())
}

#[test]
fn test_externalize_appends_to_existing_bundle() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("App.java", SOURCE)?;
    test.write_file("messages.properties", "# app strings\nexisting=value\n")?;

    let mut cmd = test.externalize_command("App.java");
    cmd.arg("--apply");
    assert!(cmd.output()?.status.success());

    let bundle = test.read_file("messages.properties")?;
    assert_eq!(bundle, "# app strings\nexisting=value\nApp.0=Hello\n");
    Ok(())
}

#[test]
fn test_externalize_blocks_on_conflicting_bundle_value() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("App.java", SOURCE)?;
    test.write_file("messages.properties", "App.0=Goodbye\n")?;

    let mut cmd = test.externalize_command("App.java");
    cmd.arg("--apply");
    let output = cmd.output()?;

    assert_eq!(output.status.code(), Some(1));
    // nothing was touched
    assert_eq!(test.read_file("App.java")?, SOURCE);
    assert_eq!(test.read_file("messages.properties")?, "App.0=Goodbye\n");
    Ok(())
}

#[test]
fn test_externalize_reuses_identical_bundle_entry() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("App.java", SOURCE)?;
    test.write_file("messages.properties", "App.0=Hello\n")?;

    let mut cmd = test.externalize_command("App.java");
    cmd.arg("--apply");
    let output = cmd.output()?;
    assert!(output.status.success());

    // no duplicate line appended, source still rewritten
    assert_eq!(test.read_file("messages.properties")?, "App.0=Hello\n");
    assert!(test.read_file("App.java")?.contains("Messages.getString(\"App.0\")"));
    Ok(())
}

#[test]
fn test_externalize_honors_cli_overrides() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("App.java", SOURCE)?;

    let mut cmd = test.externalize_command("App.java");
    cmd.args([
        "--apply",
        "--pattern",
        "Msg.get(${key})",
        "--bundle",
        "app.properties",
        "--key-prefix",
        "app",
        "--no-accessor",
    ]);
    let output = cmd.output()?;
    assert!(output.status.success());

    assert!(test.read_file("App.java")?.contains("Msg.get(\"app.0\")"));
    assert_eq!(test.read_file("app.properties")?, "app.0=Hello\n");
    assert!(!test.exists("Messages.java"));
    Ok(())
}

#[test]
fn test_externalize_leaves_tagged_literals_alone() -> Result<()> {
    let source = "class App {\n    String a = \"kept\"; //$NON-NLS-1$\n    String b = \"moved\";\n}\n";
    let test = CliTest::new()?;
    test.write_file("App.java", source)?;

    let mut cmd = test.externalize_command("App.java");
    cmd.args(["--apply", "--no-accessor"]);
    assert!(cmd.output()?.status.success());

    let rewritten = test.read_file("App.java")?;
    assert!(rewritten.contains("String a = \"kept\"; //$NON-NLS-1$"));
    assert!(rewritten.contains("Messages.getString(\"App.1\")"));

    let bundle = test.read_file("messages.properties")?;
    assert_eq!(bundle, "App.1=moved\n");
    Ok(())
}
