//! Algebraic laws the engine must satisfy on its canonical ids.

mod common;

use common::Tester;

use bddsh::bdd::Bdd;
use bddsh::node::Node;
use bddsh::types::NodeId;

#[test]
fn terminal_identity() {
    let mut t = Tester::new();
    assert_eq!(t.build("true"), NodeId::TRUE);
    assert_eq!(t.build("false"), NodeId::FALSE);
}

#[test]
fn canonicity_of_equivalent_formulas() {
    let mut t = Tester::new();
    t.feed("bvar x y z;");

    let pairs = [
        ("x & (y | z)", "(x & y) | (x & z)"),
        ("!(x & y)", "!x | !y"),
        ("!(x | y)", "!x & !y"),
        ("x -> y", "!x | y"),
        ("x == y", "(x -> y) & (y -> x)"),
        ("x != y", "!(x == y)"),
        ("x | (x & y)", "x"),
        ("x & (x | y)", "x"),
        ("(x -> y) & (y -> z)", "!x & !y | y & z"),
    ];
    for (a, b) in pairs {
        assert_eq!(t.build(a), t.build(b), "`{}` vs `{}`", a, b);
    }
}

#[test]
fn idempotence_and_involution() {
    let mut t = Tester::new();
    t.feed("bvar x y;");

    assert_eq!(t.build("x & x"), t.build("x"));
    assert_eq!(t.build("x | x"), t.build("x"));
    assert_eq!(t.build("!!x"), t.build("x"));
    assert_eq!(t.build("!!(x & y)"), t.build("x & y"));
}

#[test]
fn no_internal_node_has_equal_children() {
    let mut t = Tester::new();
    t.feed("bvar x y z w;");
    for input in [
        "x & y | z",
        "x == y",
        "x != y & w",
        "exists (y) (x & y | z)",
        "sub { x: w } (x & y)",
    ] {
        let root = t.build(input);
        check_reduced(t.interp.bdd(), root);
    }
}

fn check_reduced(bdd: &Bdd, id: NodeId) {
    if let Some(Node::Internal { high, low, .. }) = bdd.get(id) {
        assert_ne!(high, low, "node {} has equal children", id);
        check_reduced(bdd, high);
        check_reduced(bdd, low);
    }
}

#[test]
fn quantifiers_distribute() {
    let mut t = Tester::new();
    t.feed("bvar v a b;");

    // ∃v. (a ∨ b) == (∃v. a) ∨ (∃v. b)
    let lhs = t.build("exists (v) ((v & a) | (v & b))");
    let rhs = t.build("(exists (v) (v & a)) | (exists (v) (v & b))");
    assert_eq!(lhs, rhs);

    // ∀v. (a ∧ b) == (∀v. a) ∧ (∀v. b)
    let lhs = t.build("forall (v) ((v | a) & (v | b))");
    let rhs = t.build("(forall (v) (v | a)) & (forall (v) (v | b))");
    assert_eq!(lhs, rhs);
}

#[test]
fn existential_equals_disjunction_of_cofactors() {
    let mut t = Tester::new();
    t.feed("bvar v a b;");

    // ∃v. f == f[v:=1] ∨ f[v:=0], with the cofactors taken by
    // substitution.
    let formula = "(v & a) | (!v & b)";
    let lhs = t.build(&format!("exists (v) ({})", formula));
    let rhs = t.build(&format!(
        "(sub {{ v: true }} ({})) | (sub {{ v: false }} ({}))",
        formula, formula
    ));
    assert_eq!(lhs, rhs);
}

#[test]
fn quantifying_absent_variable_is_identity() {
    let mut t = Tester::new();
    t.feed("bvar v a;");
    assert_eq!(t.build("exists (v) a"), t.build("a"));
    assert_eq!(t.build("forall (v) a"), t.build("a"));
}

#[test]
fn sat_is_exactly_nonzero() {
    let mut t = Tester::new();
    t.feed("bvar x y;");
    for input in ["true", "false", "x", "!x", "x & !x", "x | !x", "x & y"] {
        let id = t.build(input);
        assert_eq!(
            t.interp.bdd_mut().is_sat(id),
            id != NodeId::FALSE,
            "is_sat disagrees with id on `{}`",
            input
        );
    }
}

#[test]
fn substitution_identity() {
    let mut t = Tester::new();
    t.feed("bvar x y;");
    assert_eq!(t.build("sub { x: x } (x & y)"), t.build("x & y"));
}

#[test]
fn substitution_compose_vs_simultaneous() {
    let mut t = Tester::new();
    t.feed("bvar x y z;");

    // Sequential: x -> y, then y -> z, chains to z.
    assert_eq!(t.build("sub { y: z } sub { x: y } x"), t.build("z"));
    // Simultaneous: x goes to y and stays there.
    assert_eq!(t.build("sub { x: y, y: z } x"), t.build("y"));
}

#[test]
fn reification_inverts_build() {
    let mut t = Tester::new();
    t.feed("bvar x y z;");
    for input in ["true", "false", "x", "x & y", "(x | y) & !z", "x == y"] {
        let id = t.build(input);
        let expr = t.interp.reify(id).unwrap();
        assert_eq!(t.interp.build(&expr).unwrap(), id, "round trip of `{}`", input);
    }
}

#[test]
fn sweep_safety_for_preserved_bindings() {
    let mut t = Tester::new();
    t.feed("bvar x y z; set n = (x | y) & z; preserve n;");
    let before = t.build("n");

    t.feed("sweep;");
    let after = t.build("n");
    assert_eq!(before, after);

    // And the preserved diagram still rebuilds from scratch to the same id.
    assert_eq!(t.build("(x | y) & z"), before);
}

#[test]
fn duality() {
    let mut t = Tester::new();
    t.feed("bvar a b;");
    assert_eq!(t.build("!(a & b)"), t.build("!a | !b"));
    assert_eq!(t.build("!(a | b)"), t.build("!a & !b"));
}
