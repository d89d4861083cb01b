//! Reader for Khronos-style registry XML.
//!
//! Only `registry/commands/command` is consulted. Each command contributes
//! one signature built from the flattened text of its `<proto>` and `<param>`
//! children; tags are dropped and their text concatenated, which yields a
//! plain C declaration.

use roxmltree::{Document, Node};

use crate::types::split_declaration;
use crate::{FunctionSignature, Param, ParseError};

/// Parse every `<command>` in a registry document.
///
/// `origin` names the document in error messages (usually its path).
pub fn parse_registry(origin: &str, xml: &str) -> Result<Vec<FunctionSignature>, ParseError> {
    let doc = Document::parse(xml).map_err(|e| ParseError::Xml {
        origin: origin.to_string(),
        message: e.to_string(),
    })?;

    let mut functions = Vec::new();
    for commands in child_elements(doc.root_element(), "commands") {
        for command in child_elements(commands, "command") {
            let func = parse_command(command, origin).map_err(|e| match e {
                ParseError::Declaration(_) => ParseError::InSource {
                    origin: origin.to_string(),
                    inner: Box::new(e),
                },
                other => other,
            })?;
            functions.push(func);
        }
    }

    tracing::debug!(origin, count = functions.len(), "read registry commands");
    Ok(functions)
}

fn parse_command(command: Node<'_, '_>, origin: &str) -> Result<FunctionSignature, ParseError> {
    let proto = child_elements(command, "proto")
        .next()
        .ok_or_else(|| ParseError::MissingProto {
            origin: origin.to_string(),
        })?;
    let (return_type, name) = split_declaration(&flatten_text(proto))?;

    let params = child_elements(command, "param")
        .map(|param| {
            let (ty, name) = split_declaration(&flatten_text(param))?;
            Ok(Param::new(ty, name))
        })
        .collect::<Result<Vec<_>, ParseError>>()?;

    Ok(FunctionSignature::new(name, return_type, params))
}

fn child_elements<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |n| n.is_element() && n.has_tag_name(tag))
}

/// All text below `node`, in document order, with the tags removed.
fn flatten_text(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}
