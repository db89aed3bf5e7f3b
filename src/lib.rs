pub mod graph;
pub mod grouping;
pub mod input;
pub mod kinship;
pub mod layout;
pub mod measure;
pub mod model;
pub mod sequence;
pub mod svg;

use wasm_bindgen::prelude::*;

use kinship::{English, KinshipResolver, Korean, RelationResult};
use layout::{FamilyLayout, LayoutEngine, RenderContext};
use model::Member;

/// Lay out every member as a positioned card plus the edges between them.
pub fn build_family_layout(members: &[Member]) -> FamilyLayout {
    LayoutEngine::default().layout(members)
}

/// Same as [`build_family_layout`], attaching `ctx` to every node payload.
pub fn build_family_layout_with<H: Clone>(members: &[Member], ctx: &RenderContext<H>) -> FamilyLayout<H> {
    LayoutEngine::default().layout_with(members, ctx)
}

/// How `target` is related to `viewer`, in English.
pub fn get_relationship(viewer: &Member, target: &Member, members: &[Member]) -> RelationResult {
    kinship::relate(viewer, target, members)
}

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, String> {
    let json = serde_json::to_string(value).map_err(|e| e.to_string())?;
    js_sys::JSON::parse(&json).map_err(|e| format!("{:?}", e))
}

/// Lay out a JSON member list; returns `{ nodes, edges, width, height }`.
#[wasm_bindgen(js_name = "familyLayout")]
pub fn family_layout_js(members_json: &str, dark_mode: bool) -> Result<JsValue, String> {
    let members = input::parse_members(members_json).map_err(|e| e.to_string())?;
    let ctx: RenderContext = RenderContext {
        dark_mode,
        on_select: None,
    };
    to_js(&build_family_layout_with(&members, &ctx))
}

/// Render a JSON member list to SVG.
#[wasm_bindgen(js_name = "familyTreeSvg")]
pub fn family_tree_svg(members_json: &str, dark_mode: bool) -> Result<String, String> {
    let members = input::parse_members(members_json).map_err(|e| e.to_string())?;
    let ctx: RenderContext = RenderContext {
        dark_mode,
        on_select: None,
    };
    let layout = build_family_layout_with(&members, &ctx);
    Ok(svg::SvgRenderer::default().render(&layout))
}

/// Relationship between two members of a JSON member list.
/// `lang` is `"ko"` for Korean, anything else for English.
#[wasm_bindgen(js_name = "relationship")]
pub fn relationship_js(
    members_json: &str,
    viewer_id: &str,
    target_id: &str,
    lang: Option<String>,
) -> Result<JsValue, String> {
    let members = input::parse_members(members_json).map_err(|e| e.to_string())?;
    let result = relate_by_id(&members, viewer_id, target_id, lang.as_deref())?;
    to_js(&result)
}

/// Resolve two ids and relate them in the requested language.
pub fn relate_by_id(
    members: &[Member],
    viewer_id: &str,
    target_id: &str,
    lang: Option<&str>,
) -> Result<RelationResult, String> {
    let graph = graph::FamilyGraph::new(members);
    let viewer = graph
        .get(viewer_id)
        .ok_or_else(|| format!("Unknown member id: {}", viewer_id))?;
    let target = graph
        .get(target_id)
        .ok_or_else(|| format!("Unknown member id: {}", target_id))?;

    Ok(match lang {
        Some("ko") => KinshipResolver::new(Korean).relate_in(viewer, target, &graph),
        _ => KinshipResolver::new(English).relate_in(viewer, target, &graph),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinship::{Kinship, Side};
    use crate::model::Gender;

    fn members() -> Vec<Member> {
        vec![
            Member::new("gf", "Grandfather", Gender::Male, 1),
            Member::new("dad", "Dad", Gender::Male, 2).with_father("gf"),
            Member::new("me", "Me", Gender::Female, 3).with_father("dad"),
        ]
    }

    #[test]
    fn test_build_family_layout() {
        let layout = build_family_layout(&members());
        assert_eq!(layout.nodes.len(), 3);
        assert_eq!(layout.edges.len(), 2);
    }

    #[test]
    fn test_get_relationship() {
        let members = members();
        let result = get_relationship(&members[2], &members[0], &members);
        assert_eq!(
            result.kinship,
            Kinship::Grandparent {
                side: Side::Paternal,
                gender: Gender::Male
            }
        );
        assert_eq!(result.label, "paternal grandfather");
    }

    #[test]
    fn test_relate_by_id() {
        let members = members();
        let result = relate_by_id(&members, "me", "dad", Some("ko")).unwrap();
        assert_eq!(result.label, "아버지");
        assert!(relate_by_id(&members, "me", "ghost", None).is_err());
    }

    #[test]
    fn test_demo_family_korean_labels() {
        let members = input::parse_members(include_str!("../demos/kim_family.json")).unwrap();
        let label = |viewer: &str, target: &str| {
            relate_by_id(&members, viewer, target, Some("ko")).unwrap().label
        };

        assert_eq!(label("12", "1"), "증조할아버지");
        assert_eq!(label("11", "5"), "고모");
        assert_eq!(label("11", "9"), "형제");
        assert_eq!(label("1", "12"), "증손자");
        assert_eq!(label("9", "10"), "아내");
    }

    #[test]
    fn test_layout_json_shape() {
        let json = serde_json::to_value(build_family_layout(&members())).unwrap();
        assert_eq!(json["edges"][0]["kind"], "father-link");
        assert_eq!(json["nodes"][0]["memberId"], "gf");
        assert!(json["nodes"][0]["data"].get("onSelect").is_none());
    }
}
