use scraper::{ElementRef, Node, node::Element};

/// Elements whose content starts and ends on its own line.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li",
    "main", "nav", "ol", "p", "pre", "section", "table", "tr", "ul",
];

enum Step<'a> {
    Visit(ElementRef<'a>),
    Text(&'a str),
    LineBreak,
    EndBlock,
}

/// Collect the text beneath `root`, giving each block element its own
/// line(s). Elements for which `skip` returns true are dropped along with
/// everything under them.
///
/// The walk keeps its own stack, so nesting depth is bounded by memory
/// rather than by the thread's call stack.
pub fn block_text<F>(root: ElementRef<'_>, skip: F) -> String
where
    F: Fn(&Element) -> bool,
{
    let mut out = String::new();
    let mut stack = Vec::new();
    push_children(root, &skip, &mut stack);

    while let Some(step) = stack.pop() {
        match step {
            Step::Text(text) => out.push_str(text),
            Step::LineBreak => out.push('\n'),
            Step::EndBlock => break_line(&mut out),
            Step::Visit(element) => {
                if BLOCK_ELEMENTS.contains(&element.value().name()) {
                    break_line(&mut out);
                    stack.push(Step::EndBlock);
                }
                push_children(element, &skip, &mut stack);
            }
        }
    }
    out
}

/// Queue the children of `element` so they pop off `stack` in document order.
fn push_children<'a, F>(element: ElementRef<'a>, skip: &F, stack: &mut Vec<Step<'a>>)
where
    F: Fn(&Element) -> bool,
{
    for child in element.children().rev() {
        match child.value() {
            Node::Text(text) => stack.push(Step::Text(&**text)),
            Node::Element(el) if skip(el) => {}
            Node::Element(el) if el.name() == "br" => stack.push(Step::LineBreak),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    stack.push(Step::Visit(child));
                }
            }
            _ => {}
        }
    }
}

fn break_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}
