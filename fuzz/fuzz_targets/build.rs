#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use specmodel::ast::{ClassNode, Constant, Expr, FieldNode, MethodNode, Statement, Stmt};
use specmodel::span::Pos;

/// Label a fuzzed statement may carry
#[derive(Arbitrary, Debug)]
enum FuzzLabel {
    None,
    Setup,
    When,
    Then,
    Expect,
    Cleanup,
    Where,
    Unknown,
}

impl FuzzLabel {
    fn as_label(&self) -> Option<String> {
        let label = match self {
            FuzzLabel::None => return None,
            FuzzLabel::Setup => "setup",
            FuzzLabel::When => "when",
            FuzzLabel::Then => "then",
            FuzzLabel::Expect => "expect",
            FuzzLabel::Cleanup => "cleanup",
            FuzzLabel::Where => "where",
            FuzzLabel::Unknown => "given",
        };
        Some(label.to_string())
    }
}

#[derive(Arbitrary, Debug)]
struct FuzzStmt {
    label: FuzzLabel,
    description: bool,
}

#[derive(Arbitrary, Debug)]
struct FuzzMethod {
    name: String,
    is_static: bool,
    is_synthetic: bool,
    body: Vec<FuzzStmt>,
}

#[derive(Arbitrary, Debug)]
struct FuzzClass {
    fields: Vec<(String, bool, bool)>,
    methods: Vec<FuzzMethod>,
    constructor: bool,
}

fn to_method(m: &FuzzMethod, line: u32) -> MethodNode {
    let statements = m
        .body
        .iter()
        .enumerate()
        .map(|(i, s)| Statement {
            label: s.label.as_label(),
            pos: Pos::new(line + i as u32 + 1, 5),
            stmt: Stmt::Expr {
                expr: if s.description {
                    Expr::Const { value: Constant::String("text".into()) }
                } else {
                    Expr::Code { text: "x".into() }
                },
            },
        })
        .collect();
    MethodNode {
        name: m.name.clone(),
        pos: Pos::new(line, 3),
        end_pos: None,
        is_static: m.is_static,
        is_synthetic: m.is_synthetic,
        statements,
    }
}

fuzz_target!(|input: FuzzClass| {
    let fields = input
        .fields
        .iter()
        .enumerate()
        .map(|(i, (name, is_static, is_synthetic))| FieldNode {
            name: name.clone(),
            pos: Pos::new(i as u32 + 2, 3),
            is_static: *is_static,
            is_synthetic: *is_synthetic,
            annotations: vec![],
        })
        .collect();
    let methods = input.methods.iter().map(|m| to_method(m, 100)).collect();
    let mut constructors = Vec::new();
    if input.constructor {
        let ctor = FuzzMethod { name: "<init>".into(), is_static: false, is_synthetic: false, body: vec![] };
        constructors.push(to_method(&ctor, 50));
    }

    let class = ClassNode {
        name: "FuzzSpec".into(),
        pos: Pos::new(1, 1),
        fields,
        properties: vec![],
        constructors,
        methods,
    };

    // Building should never panic, whatever the class looks like
    let _ = specmodel::build(class, &specmodel::ParserConfig::default());
});
