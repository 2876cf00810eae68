fn run(source: &str) -> String {
    let mut output = Vec::new();
    mylang::run_source(source, "<test>", &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn arithmetic_precedence_and_string_concat() {
    let out = run(r#"x = 2 + 3 * 4; 打印(x); 打印("v=" + x);"#);
    assert_eq!(out, "14\nv=14\n");
}

#[test]
fn integer_division_is_always_fractional() {
    let out = run("打印(7 / 2);");
    assert_eq!(out, "3.5\n");
}

#[test]
fn fractional_literal_stays_fractional_after_addition() {
    let out = run("打印(1.5 + 1);");
    assert_eq!(out, "2.5\n");
}
