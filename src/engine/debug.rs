//! Grammar pretty printing
//!
//! Renders a parser tree as indented text, one node per line. Handy when a
//! grammar assembled from shared pieces doesn't match what you expected.
//!
//! ```text
//! Sequence
//!   VariableNumber 1..=2
//!   Optional const
//!     Sequence const
//!       CharLiteral '/'
//!       FixedNumber 4 unsigned const
//! ```

use super::grouped::{GroupedChild, GroupedParser};
use super::node::Node;
use super::parser::TemporalParser;
use super::settings::SignStyle;
use std::fmt::Write;

/// Parser tree pretty printer
pub struct TreePrinter {
    /// Indentation string
    indent: String,
    /// Maximum depth to print
    max_depth: Option<usize>,
}

impl TreePrinter {
    pub fn new() -> Self {
        Self {
            indent: "  ".to_string(),
            max_depth: None,
        }
    }

    /// Set the indentation string
    pub fn indent(mut self, indent: &str) -> Self {
        self.indent = indent.to_string();
        self
    }

    /// Set the maximum depth to print
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Print a parser tree
    pub fn print(&self, parser: &TemporalParser) -> String {
        self.print_node(parser.node())
    }

    /// Print a bare node
    pub fn print_node(&self, node: &Node) -> String {
        let mut output = String::new();
        self.write_node(node, 0, &mut output);
        output
    }

    /// Print a grouped grammar
    pub fn print_grouped(&self, parser: &GroupedParser) -> String {
        let mut output = String::new();
        self.write_grouped(parser, 0, &mut output);
        output
    }

    fn write_grouped(&self, parser: &GroupedParser, depth: usize, output: &mut String) {
        let indent = self.indent.repeat(depth);
        let label = if parser.is_any_of() { "GroupedAnyOf" } else { "Grouped" };
        let _ = writeln!(output, "{}{}", indent, label);

        for child in parser.children() {
            match child {
                GroupedChild::Group(group) => {
                    let _ = writeln!(output, "{}{}Group", indent, self.indent);
                    self.write_node(group.node(), depth + 2, output);
                }
                GroupedChild::Literal(literal) => self.write_node(literal.node(), depth + 1, output),
                GroupedChild::Nested(nested) => self.write_grouped(nested, depth + 1, output),
            }
        }
    }

    fn write_node(&self, node: &Node, depth: usize, output: &mut String) {
        let indent = self.indent.repeat(depth);

        if let Some(max) = self.max_depth {
            if depth > max {
                let _ = writeln!(output, "{}...", indent);
                return;
            }
        }

        let _ = write!(output, "{}{}", indent, node.kind());

        match node {
            Node::Empty | Node::Sign(_) => {}
            Node::CharLiteral(n) => {
                let _ = write!(output, " {:?}", n.ch);
            }
            Node::StringLiteral(n) => {
                let _ = write!(output, " {:?}", n.literal);
            }
            Node::FixedNumber(n) => {
                let _ = write!(output, " {}{}", n.length, sign_suffix(n.sign_style));
            }
            Node::VariableNumber(n) => {
                let _ = write!(
                    output,
                    " {}..={}{}",
                    n.min_length,
                    n.max_length,
                    sign_suffix(n.sign_style)
                );
            }
            Node::Decimal(n) => {
                let _ = write!(
                    output,
                    " {}..={}.{}..={} scale={}{}",
                    n.min_whole_length,
                    n.max_whole_length,
                    n.min_fraction_length,
                    n.max_fraction_length,
                    n.fraction_scale,
                    sign_suffix(n.sign_style)
                );
            }
            Node::Fraction(n) => {
                let _ = write!(output, " {}..={} scale={}", n.min_length, n.max_length, n.scale);
            }
            Node::Text(n) => {
                let _ = write!(output, " {}..={}", n.min_length, n.max_length);
            }
            Node::LocalizedText(n) => {
                let _ = write!(output, " {} {:?}", n.field, n.styles);
            }
            Node::LocalizedOffset(n) => {
                let _ = write!(output, " {:?}", n.format);
            }
            Node::TimeZoneName(n) => {
                let _ = write!(output, " {:?} {:?}", n.styles, n.disambiguation);
            }
            Node::CaseScope(n) => {
                let label = if n.is_case_sensitive() { "sensitive" } else { "insensitive" };
                let _ = write!(output, " {}", label);
            }
            Node::Sequence(_) | Node::Optional(_) | Node::AnyOf(_) => {}
        }

        if node.is_const() && !node.is_literal() && !matches!(node, Node::Empty) {
            output.push_str(" const");
        }
        output.push('\n');

        match node {
            Node::Sequence(n) => self.write_children(n.children(), depth, output),
            Node::AnyOf(n) => self.write_children(n.children(), depth, output),
            Node::Optional(n) => self.write_node(n.child().node(), depth + 1, output),
            Node::CaseScope(n) => self.write_node(n.child().node(), depth + 1, output),
            _ => {}
        }
    }

    fn write_children(&self, children: &[TemporalParser], depth: usize, output: &mut String) {
        for child in children {
            self.write_node(child.node(), depth + 1, output);
        }
    }
}

impl Default for TreePrinter {
    fn default() -> Self {
        Self::new()
    }
}

fn sign_suffix(sign_style: Option<SignStyle>) -> &'static str {
    match sign_style {
        None => "",
        Some(SignStyle::Never) => " unsigned",
        Some(SignStyle::NegativeOnly) => " negative-only",
        Some(SignStyle::Always) => " signed",
    }
}
