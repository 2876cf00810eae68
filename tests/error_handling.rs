fn run(source: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut output = Vec::new();
    mylang::run_source(source, "<test>", &mut output)?;
    Ok(String::from_utf8(output).unwrap())
}

#[test]
fn divide_by_zero_is_recoverable_inside_try_catch() {
    let out = run(r#"尝试 { x = 10 / 0; 打印(x); } 捕获 (e) { 打印("caught:" + e); }"#).unwrap();
    assert!(out.starts_with("caught:"));
    assert!(out.contains("division by zero"));
}

#[test]
fn unbound_variable_is_fatal_and_names_the_variable() {
    let err = run("打印(y);").unwrap_err();
    let message = err.to_string();
    assert!(message.contains('y'));
}

#[test]
fn try_catch_does_not_bind_error_var_when_try_block_succeeds() {
    let out = run(r#"尝试 { x = 1; } 捕获 (e) { 打印(e); } 打印(x);"#).unwrap();
    assert_eq!(out, "1\n");
}

#[test]
fn error_raised_outside_try_is_fatal() {
    assert!(run("x = 1 / 0;").is_err());
}
