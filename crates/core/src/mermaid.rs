//! Rewrites ```` ```mermaid ```` fences into `<Mermaid chart="..." />` elements.

use crate::parse::AstTransform;
use markdown::mdast::{
    AttributeContent, AttributeValue, Code, MdxJsxAttribute, MdxJsxFlowElement, Node,
};

/// Component name the diagram fences are rewritten to.
pub const MERMAID_COMPONENT: &str = "Mermaid";

/// AST transform turning mermaid code fences into diagram components.
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidTransform;

impl AstTransform for MermaidTransform {
    fn transform(&self, root: &mut Node) {
        rewrite(root);
    }
}

fn rewrite(node: &mut Node) {
    if let Node::Code(code) = node
        && is_mermaid(code)
    {
        let element = diagram_element(code);
        *node = element;
        return;
    }
    if let Some(children) = node.children_mut() {
        for child in children {
            rewrite(child);
        }
    }
}

fn is_mermaid(code: &Code) -> bool {
    code.lang
        .as_deref()
        .is_some_and(|lang| lang.eq_ignore_ascii_case("mermaid"))
}

fn diagram_element(code: &Code) -> Node {
    Node::MdxJsxFlowElement(MdxJsxFlowElement {
        name: Some(MERMAID_COMPONENT.to_string()),
        attributes: vec![AttributeContent::Property(MdxJsxAttribute {
            name: "chart".to_string(),
            value: Some(AttributeValue::Literal(code.value.clone())),
        })],
        children: Vec::new(),
        position: code.position.clone(),
    })
}
