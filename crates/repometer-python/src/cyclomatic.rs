//! Radon-style cyclomatic complexity.
//!
//! Blocks are module-level functions, classes and methods. A function scores
//! one plus the decision points of its own body: lambdas count toward it,
//! nested `def`s and classes do not. A class scores its body plus the summed
//! method scores, averaged over the methods; nested classes add nothing.

use tree_sitter::Node;

/// Scores of every block: module-level functions first, then each class
/// followed by its methods, each group in document order.
pub fn block_scores(root: Node<'_>) -> Vec<u32> {
    let mut functions = Vec::new();
    let mut classes = Vec::new();

    let mut stack = named_children_rev(root);
    while let Some(node) = stack.pop() {
        match node.kind() {
            "function_definition" => functions.push(function_score(node)),
            "class_definition" => classes.extend(class_scores(node)),
            _ => stack.extend(named_children_rev(node)),
        }
    }

    functions.extend(classes);
    functions
}

pub fn function_score(node: Node<'_>) -> u32 {
    1 + node.child_by_field_name("body").map_or(0, decisions)
}

/// The class score followed by its method scores.
pub fn class_scores(node: Node<'_>) -> Vec<u32> {
    let mut methods = Vec::new();
    let mut body_points = 0;

    if let Some(body) = node.child_by_field_name("body") {
        let mut stack = named_children_rev(body);
        while let Some(child) = stack.pop() {
            match child.kind() {
                "function_definition" => methods.push(function_score(child)),
                "class_definition" => {}
                _ => {
                    body_points += node_points(child);
                    stack.extend(named_children_rev(child));
                }
            }
        }
    }

    let real = 1 + body_points + methods.iter().sum::<u32>();
    let count = methods.len() as u32;
    let score = if count == 0 {
        real
    } else {
        real / count + u32::from(count > 1)
    };

    let mut scores = Vec::with_capacity(methods.len() + 1);
    scores.push(score);
    scores.extend(methods);
    scores
}

/// Decision points in `node` and below it, stopping at nested definitions.
pub fn decisions(node: Node<'_>) -> u32 {
    let mut total = 0;
    let mut stack = vec![node];
    while let Some(n) = stack.pop() {
        if is_nested_definition(n) {
            continue;
        }
        total += node_points(n);
        stack.extend(named_children_rev(n));
    }
    total
}

fn is_nested_definition(node: Node<'_>) -> bool {
    matches!(
        node.kind(),
        "function_definition" | "class_definition" | "decorated_definition"
    )
}

fn node_points(node: Node<'_>) -> u32 {
    match node.kind() {
        "if_statement" | "elif_clause" | "conditional_expression" | "with_statement"
        | "assert_statement" | "except_clause" | "except_group_clause" | "for_in_clause"
        | "if_clause" | "boolean_operator" | "case_clause" => 1,
        "for_statement" | "while_statement" => 1 + u32::from(has_else(node)),
        "try_statement" => u32::from(has_else(node)),
        _ => 0,
    }
}

fn has_else(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .any(|child| child.kind() == "else_clause")
}

fn named_children_rev(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let mut children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
    children.reverse();
    children
}

#[cfg(test)]
mod tests {
    use crate::parse;

    fn scores(src: &str) -> Vec<u32> {
        parse(src).unwrap().cyclomatic()
    }

    #[test]
    fn empty_module_has_no_blocks() {
        assert!(scores("").is_empty());
        assert!(scores("x = 1 if y else 2\n").is_empty());
    }

    #[test]
    fn straight_line_function_scores_one() {
        assert_eq!(scores("def f():\n    return 1\n"), [1]);
    }

    #[test]
    fn if_elif_else_counts_two_branches() {
        let src = "\
def f(x):
    if x == 1:
        pass
    elif x == 2:
        pass
    else:
        pass
";
        assert_eq!(scores(src), [3]);
    }

    #[test]
    fn loop_else_adds_a_point() {
        let src = "\
def f(xs):
    for x in xs:
        pass
    else:
        pass
    while True:
        break
";
        assert_eq!(scores(src), [4]);
    }

    #[test]
    fn try_counts_handlers_and_else() {
        let src = "\
def f():
    try:
        pass
    except ValueError:
        pass
    except KeyError:
        pass
    else:
        pass
    finally:
        pass
";
        assert_eq!(scores(src), [4]);
    }

    #[test]
    fn with_and_assert_count() {
        let src = "def f(p):\n    assert p\n    with open(p) as fh:\n        return fh.read()\n";
        assert_eq!(scores(src), [3]);
    }

    #[test]
    fn comprehension_clauses_count() {
        assert_eq!(scores("def f(xs):\n    return [x for x in xs if x]\n"), [3]);
    }

    #[test]
    fn boolean_operators_count_each() {
        assert_eq!(scores("def f(a, b, c):\n    return a and b or c\n"), [3]);
    }

    #[test]
    fn match_cases_count() {
        let src = "\
def f(x):
    match x:
        case 1:
            pass
        case _:
            pass
";
        assert_eq!(scores(src), [3]);
    }

    #[test]
    fn lambdas_count_but_closures_do_not() {
        let src = "\
def f():
    def g():
        if a:
            pass
    h = lambda y: 1 if y else 2
";
        assert_eq!(scores(src), [2]);
    }

    #[test]
    fn decorator_wrapper_leaves_outer_score_alone() {
        let src = "\
def deco(fn):
    @wraps(fn)
    def wrapper(*args):
        if args:
            return fn(*args)
        return None
    return wrapper
";
        assert_eq!(scores(src), [1]);
    }

    #[test]
    fn class_inside_function_adds_nothing() {
        let src = "def f():\n    class Local:\n        x = 1 if y else 2\n    return Local\n";
        assert_eq!(scores(src), [1]);
    }

    #[test]
    fn class_score_averages_methods() {
        let src = "\
class A:
    def m1(self):
        if self.x:
            return 1
        return 0

    def m2(self):
        return 2
";
        // real = 1 + 0 + (2 + 1) = 4; 4 / 2 + 1 = 3
        assert_eq!(scores(src), [3, 2, 1]);
    }

    #[test]
    fn class_without_methods_scores_its_body() {
        assert_eq!(scores("class A:\n    x = 1 if y else 2\n"), [2]);
    }

    #[test]
    fn nested_classes_add_nothing_and_are_not_blocks() {
        let src = "\
class A:
    class B:
        x = 1 if y else 2
        z = 3 if w else 4
";
        assert_eq!(scores(src), [1]);
    }

    #[test]
    fn functions_precede_classes() {
        let src = "class A:\n    pass\n\ndef f():\n    pass\n";
        assert_eq!(scores(src), [1, 1]);
    }

    #[test]
    fn functions_under_module_level_if_are_blocks() {
        let src = "if True:\n    def f():\n        if x:\n            pass\n";
        assert_eq!(scores(src), [2]);
    }

    #[test]
    fn decorated_method_is_a_method() {
        let src = "class A:\n    @property\n    def p(self):\n        return 1\n";
        assert_eq!(scores(src), [2, 1]);
    }
}
