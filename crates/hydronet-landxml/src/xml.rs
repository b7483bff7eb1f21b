// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Element helpers over `roxmltree` nodes.

use roxmltree::Node;

use crate::error::LandXmlError;

/// `true` for an element with local name `tag`.
pub(crate) fn is(node: &Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && node.tag_name().name() == tag
}

/// Child elements with local name `tag`.
pub(crate) fn children<'a, 'i>(
    node: Node<'a, 'i>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'i>> {
    node.children().filter(move |n| is(n, tag))
}

/// First child element with local name `tag`.
pub(crate) fn child<'a, 'i>(node: Node<'a, 'i>, tag: &'static str) -> Option<Node<'a, 'i>> {
    children(node, tag).next()
}

/// Element label for errors: local name plus `name` or `id`.
pub(crate) fn label(node: &Node<'_, '_>) -> String {
    let tag = node.tag_name().name();
    match node.attribute("name").or_else(|| node.attribute("id")) {
        Some(key) => format!("{tag} {key}"),
        None => tag.to_owned(),
    }
}

/// Required attribute.
pub(crate) fn attr<'a>(node: &Node<'a, '_>, attribute: &'static str) -> Result<&'a str, LandXmlError> {
    node.attribute(attribute)
        .ok_or_else(|| LandXmlError::MissingAttribute {
            element: label(node),
            attribute,
        })
}

fn parse(node: &Node<'_, '_>, value: &str) -> Result<f64, LandXmlError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LandXmlError::BadNumber {
            element: label(node),
            value: value.to_owned(),
        })
}

/// Required numeric attribute.
pub(crate) fn number(node: &Node<'_, '_>, attribute: &'static str) -> Result<f64, LandXmlError> {
    parse(node, attr(node, attribute)?)
}

/// Optional numeric attribute; present but malformed is still an error.
pub(crate) fn opt_number(
    node: &Node<'_, '_>,
    attribute: &'static str,
) -> Result<Option<f64>, LandXmlError> {
    node.attribute(attribute).map(|v| parse(node, v)).transpose()
}

/// Whitespace-separated words of the element text, exactly `N` of them.
pub(crate) fn words<'a, const N: usize>(node: &Node<'a, '_>) -> Result<[&'a str; N], LandXmlError> {
    let found: Vec<&'a str> = node.text().unwrap_or_default().split_whitespace().collect();
    <[&'a str; N]>::try_from(found.as_slice()).map_err(|_| LandXmlError::WrongArity {
        element: label(node),
        expected: N,
        found: found.len(),
    })
}

/// Element text as exactly `N` numbers.
pub(crate) fn numbers<const N: usize>(node: &Node<'_, '_>) -> Result<[f64; N], LandXmlError> {
    let mut out = [0.0; N];
    for (slot, word) in out.iter_mut().zip(words::<N>(node)?) {
        *slot = parse(node, word)?;
    }
    Ok(out)
}
