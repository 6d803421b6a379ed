//! Parsing of the v2 `queryresult` XML document.

use chanbot_core::JOIN_TOKEN;
use roxmltree::{Document, Node};
use tracing::debug;

use crate::error::WaError;

/// One titled block of plaintext inside a pod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subpod {
    pub title: String,
    /// Normalized plaintext, lines joined with [`JOIN_TOKEN`].
    pub plaintext: String,
}

/// One result pod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pod {
    pub title: String,
    pub position: u32,
    pub primary: bool,
    pub subpods: Vec<Subpod>,
}

/// What a query produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaOutcome {
    /// The API reported an error; the message is meant for the user.
    ApiError(String),
    /// The query was understood but nothing usable came back.
    NoResult,
    /// Usable pods, primary first, then by position.
    Pods(Vec<Pod>),
}

/// Flattens subpod plaintext to one line: single spaces, no tabs, `|` as `-`, and the lines
/// (minus `...` placeholders) joined with [`JOIN_TOKEN`].
pub fn normalize_plaintext(raw: &str) -> String {
    let cleaned = raw
        .trim()
        .replace("  ", " ")
        .replace('\t', " ")
        .replace('|', "-");
    cleaned
        .split('\n')
        .filter(|line| *line != "...")
        .collect::<Vec<_>>()
        .join(JOIN_TOKEN)
}

/// Pods worth saying: the first one, plus every following primary pod.
pub fn answer_pods(pods: &[Pod]) -> &[Pod] {
    if pods.is_empty() {
        return pods;
    }
    let extra = pods[1..].iter().take_while(|p| p.primary).count();
    &pods[..1 + extra]
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

fn parse_pod(pod: Node) -> Result<Option<Pod>, WaError> {
    if pod.attribute("error") == Some("true") {
        return Ok(None);
    }

    let position = pod
        .attribute("position")
        .and_then(|p| p.trim().parse::<u32>().ok())
        .ok_or(WaError::MissingAttribute {
            element: "pod",
            attribute: "position",
        })?;

    let subpods: Vec<Subpod> = pod
        .children()
        .filter(|n| n.has_tag_name("subpod"))
        .filter_map(|subpod| {
            let text = child(subpod, "plaintext")?.text()?;
            if text.is_empty() {
                return None;
            }
            Some(Subpod {
                title: subpod.attribute("title").unwrap_or_default().trim().to_string(),
                plaintext: normalize_plaintext(text),
            })
        })
        .collect();

    if subpods.is_empty() {
        return Ok(None);
    }

    Ok(Some(Pod {
        title: pod.attribute("title").unwrap_or_default().trim().to_string(),
        position,
        primary: pod.attribute("primary") == Some("true"),
        subpods,
    }))
}

impl WaOutcome {
    /// Parses a raw `queryresult` document.
    pub fn parse(xml: &str) -> Result<Self, WaError> {
        let doc = Document::parse(xml)?;
        let root = doc.root_element();

        if root.attribute("error") == Some("true") {
            let msg = child(root, "error")
                .and_then(|e| child(e, "msg"))
                .and_then(|m| m.text())
                .unwrap_or("unknown error")
                .trim()
                .to_string();
            return Ok(WaOutcome::ApiError(msg));
        }

        if root.attribute("success") == Some("false") {
            debug!(response = %xml, "No data parsed from response");
            return Ok(WaOutcome::NoResult);
        }

        let mut pods = Vec::new();
        for pod in root.children().filter(|n| n.has_tag_name("pod")) {
            if let Some(pod) = parse_pod(pod)? {
                pods.push(pod);
            }
        }

        if pods.is_empty() {
            return Ok(WaOutcome::NoResult);
        }

        pods.sort_by_key(|p| (!p.primary, p.position));
        Ok(WaOutcome::Pods(pods))
    }
}
