use contractdoc::prelude::*;

fn contract(decorator: &str) -> Contract {
    contract_from_decorator(decorator).expect("decorator should inspect")
}

fn lines(entity_kind: &str, manifest: &str, name: &str) -> Vec<String> {
    let manifest = Manifest::from_toml_str(manifest).expect("manifest should load");
    let entity = manifest.entity(name).expect("entity should exist");
    format_contracts(entity_kind, entity, &RenderConfig::default()).expect("rendering should succeed")
}

#[test]
fn function_without_contracts() {
    let manifest = r#"
[[entity]]
name = "some_func"
kind = "function"
"#;
    assert!(lines("function", manifest, "some_func").is_empty());
    assert!(lines("class", manifest, "some_func").is_empty());
}

#[test]
fn pre_and_post_with_descriptions() {
    let manifest = r#"
[[entity]]
name = "some_func"
kind = "function"
requires = [["@icontract.require(lambda x: x > 0, 'some precondition')"]]
ensures = ["@icontract.ensure(lambda x, result: result >= x, 'some postcondition')"]
"#;
    assert_eq!(
        lines("function", manifest, "some_func"),
        vec![
            ":requires:",
            "    * :code:`x > 0` (some precondition)",
            ":ensures:",
            "    * :code:`result >= x` (some postcondition)",
        ]
    );
}

#[test]
fn class_hierarchy() {
    let manifest = r#"
[[entity]]
name = "SomeAbstract"
kind = "class"
invariants = [["@icontract.invariant(lambda self: self.some_getter() > 0)"]]

[[entity]]
name = "SomeClass"
kind = "class"
invariants = [
    ["@icontract.invariant(lambda self: self.some_getter() > 0)"],
    ["@icontract.invariant(lambda self: self.some_getter() < 100)"],
]

[[entity]]
name = "SomeClass.some_func"
kind = "method"
requires = [
    ["@icontract.require(lambda x: x % 2 == 0)", "@icontract.require(lambda x: x > 0)"],
    ["@icontract.require(lambda x: x % 3 == 0)", "@icontract.require(lambda x: x > -20)"],
]
ensures = [
    "@icontract.ensure(lambda result: result > 0)",
    "@icontract.ensure(lambda result: result > 10)",
]
"#;
    assert_eq!(
        lines("class", manifest, "SomeAbstract"),
        vec![":establishes:", "    * :code:`self.some_getter() > 0`"]
    );
    assert_eq!(
        lines("class", manifest, "SomeClass"),
        vec![
            ":establishes:",
            "    * :code:`self.some_getter() > 0`",
            "    * :code:`self.some_getter() < 100`",
        ]
    );
    assert_eq!(
        lines("method", manifest, "SomeClass.some_func"),
        vec![
            ":requires:",
            "    * :code:`x % 2 == 0`",
            "    * :code:`x > 0`",
            ":requires else:",
            "    * :code:`x % 3 == 0`",
            "    * :code:`x > -20`",
            ":ensures:",
            "    * :code:`result > 0`",
            "    * :code:`result > 10`",
        ]
    );
}

#[test]
fn empty_alternative_has_no_heading() {
    let set = ContractSet {
        preconditions: vec![vec![], vec![contract("@icontract.require(lambda x: x > 0)")]],
        ..Default::default()
    };
    let rendered = format_contract_set(&set, None, &RenderConfig::default());
    assert_eq!(rendered, vec![":requires:", "    * :code:`x > 0`"]);
    assert!(!rendered.iter().any(|line| line.contains("requires else")));
}

#[test]
fn implications_in_plain_markup() {
    let config = RenderConfig::default().with_markup(Markup::Plain);
    let render = |decorator: &str| format_contract(&contract(decorator), &config);

    assert_eq!(
        render("@icontract.require(lambda x: not (x > 0) or x < 100)"),
        vec!["x > 0 ⇒ x < 100"]
    );
    assert_eq!(
        render("@icontract.require(lambda x, y: x == 0 or x % 2 == 0)"),
        vec!["x != 0 ⇒ x % 2 == 0"]
    );
    assert_eq!(
        render("@icontract.require(lambda x, y: y == 1 if x in [1, 2] else True)"),
        vec!["x in [1, 2] ⇒ y == 1"]
    );
    assert_eq!(
        render("@icontract.require(lambda x: x > 0, error=lambda: ValueError(\"x positive\"))"),
        vec!["x > 0 (x positive; raise ValueError)"]
    );
}

#[test]
fn negated_antecedent_keeps_operand_grouping() {
    let config = RenderConfig::default().with_markup(Markup::Plain);
    let render = |decorator: &str| format_contract(&contract(decorator), &config);

    assert_eq!(
        render("@icontract.require(lambda a, b, c, d: (a or b) == c or d)"),
        vec!["(a or b) != c ⇒ d"]
    );
    assert_eq!(
        render("@icontract.require(lambda a, b, c, d: (a if b else c) < d or a)"),
        vec!["(a if b else c) >= d ⇒ a"]
    );
}

#[test]
fn two_line_condition_is_never_truncated() {
    let decorator = "@icontract.require(\n    lambda lst: all(item > 0\n                    for item in lst))";
    let rendered = format_contract(&contract(decorator), &RenderConfig::default());
    assert_eq!(
        rendered,
        vec!["::", "", "    all(item > 0", "    for item in lst)", ""]
    );
    assert!(rendered.iter().all(|line| !line.contains(":code:")));
}

#[test]
fn every_contract_yields_a_bullet() {
    let config = RenderConfig::default();
    let contracts: Vec<Contract> = [
        "@icontract.ensure(lambda result: result)",
        "@icontract.ensure(lambda result: not result or len(result) > 0)",
        "@icontract.ensure(lambda result: (result\n    is not None))",
        "@icontract.ensure(is_valid, 'valid')",
    ]
    .into_iter()
    .map(contract)
    .collect();

    let rendered = format_postconditions(&contracts, None, &config);
    let bullets = rendered.iter().filter(|line| line.starts_with("    * ")).count();
    assert_eq!(bullets, contracts.len());
    assert!(rendered.iter().all(|line| !line.contains('\n')));
}

#[test]
fn property_accessors() {
    let manifest = r#"
[[entity]]
name = "SomeClass.value"
kind = "attribute"

[entity.get]
ensures = ["@icontract.ensure(lambda result: result > 0)"]

[entity.set]
requires = [["@icontract.require(lambda value: value > 0)"]]
snapshots = ["@icontract.snapshot(lambda self: self.value, name='value')"]
"#;
    assert_eq!(
        lines("attribute", manifest, "SomeClass.value"),
        vec![
            ":get ensures:",
            "    * :code:`result > 0`",
            ":set requires:",
            "    * :code:`value > 0`",
            ":set OLD:",
            "    * :code:`value` = :code:`self.value`",
        ]
    );
}

#[test]
fn malformed_decorator_aborts_the_entity() {
    let manifest = r#"
[[entity]]
name = "some_func"
kind = "function"
snapshots = ["@icontract.snapshot(lambda a, b: a + b)"]
"#;
    let manifest = Manifest::from_toml_str(manifest).unwrap();
    let entity = manifest.entity("some_func").unwrap();
    let error = format_contracts("function", entity, &RenderConfig::default()).unwrap_err();
    assert!(error.is_malformed_decorator());
}
