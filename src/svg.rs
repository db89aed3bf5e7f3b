use crate::layout::{EdgeKind, FamilyLayout, LayoutEdge, LayoutNode};
use crate::measure::TextMetrics;
use crate::model::Gender;
use std::collections::HashMap;
use std::fmt::Write;

pub struct SvgRenderer {
    metrics: TextMetrics,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            metrics: TextMetrics::default(),
        }
    }
}

struct Palette {
    background: &'static str,
    card: &'static str,
    male: &'static str,
    female: &'static str,
    text: &'static str,
    edge: &'static str,
}

const LIGHT: Palette = Palette {
    background: "#ffffff",
    card: "#ffffff",
    male: "#3b6ea5",
    female: "#b5475f",
    text: "#222222",
    edge: "#777777",
};

const DARK: Palette = Palette {
    background: "#1e1e1e",
    card: "#2b2b2b",
    male: "#7aa7d9",
    female: "#e08a9c",
    text: "#eeeeee",
    edge: "#aaaaaa",
};

impl SvgRenderer {
    pub fn render<H>(&self, layout: &FamilyLayout<H>) -> String {
        let mut svg = String::new();
        let dark = layout.nodes.first().is_some_and(|n| n.data.dark_mode);
        let palette = if dark { &DARK } else { &LIGHT };

        writeln!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            layout.width, layout.height, layout.width, layout.height
        )
        .unwrap();

        // Style
        writeln!(
            &mut svg,
            r#"<style>
  .canvas {{ fill: {bg}; }}
  .card {{ fill: {card}; stroke-width: 2; }}
  .male {{ stroke: {male}; }}
  .female {{ stroke: {female}; }}
  .deceased {{ opacity: 0.6; stroke-dasharray: 4 2; }}
  .name {{ font-family: sans-serif; font-size: 14px; font-weight: bold; fill: {text}; }}
  .span {{ font-family: sans-serif; font-size: 11px; fill: {text}; }}
  .edge {{ stroke: {edge}; stroke-width: 1.5; fill: none; }}
  .spouse {{ stroke-dasharray: 6 3; }}
</style>"#,
            bg = palette.background,
            card = palette.card,
            male = palette.male,
            female = palette.female,
            text = palette.text,
            edge = palette.edge,
        )
        .unwrap();

        writeln!(
            &mut svg,
            r#"<rect class="canvas" x="0" y="0" width="{}" height="{}" />"#,
            layout.width, layout.height
        )
        .unwrap();

        let node_map: HashMap<&str, &LayoutNode<H>> =
            layout.nodes.iter().map(|n| (n.member_id.as_str(), n)).collect();

        // Render edges first (behind cards)
        for edge in &layout.edges {
            if let (Some(source), Some(target)) = (
                node_map.get(edge.source.as_str()),
                node_map.get(edge.target.as_str()),
            ) {
                self.render_edge(&mut svg, edge, source, target);
            }
        }

        for node in &layout.nodes {
            self.render_node(&mut svg, node);
        }

        writeln!(&mut svg, "</svg>").unwrap();
        svg
    }

    fn render_node<H>(&self, svg: &mut String, node: &LayoutNode<H>) {
        let mut class = match node.data.gender {
            Gender::Male => "card male".to_string(),
            Gender::Female => "card female".to_string(),
        };
        if node.data.deceased {
            class.push_str(" deceased");
        }

        writeln!(
            svg,
            r#"<rect class="{}" x="{}" y="{}" width="{}" height="{}" rx="6" data-member="{}" />"#,
            class,
            node.x,
            node.y,
            node.width,
            node.height,
            escape_xml(&node.member_id)
        )
        .unwrap();

        let center_x = node.x + node.width / 2.0;
        let name_y = match node.data.life_span {
            Some(_) => node.y + self.metrics.padding_y + self.metrics.line_height * 0.75,
            None => node.y + node.height / 2.0 + 5.0,
        };
        writeln!(
            svg,
            r#"<text class="name" x="{}" y="{}" text-anchor="middle">{}</text>"#,
            center_x,
            name_y,
            escape_xml(&node.data.name)
        )
        .unwrap();

        if let Some(span) = &node.data.life_span {
            writeln!(
                svg,
                r#"<text class="span" x="{}" y="{}" text-anchor="middle">{}</text>"#,
                center_x,
                name_y + self.metrics.line_height,
                escape_xml(span)
            )
            .unwrap();
        }
    }

    fn render_edge<H>(
        &self,
        svg: &mut String,
        edge: &LayoutEdge,
        source: &LayoutNode<H>,
        target: &LayoutNode<H>,
    ) {
        match edge.kind {
            EdgeKind::Spouse => {
                let (left, right) = if source.x <= target.x {
                    (source, target)
                } else {
                    (target, source)
                };
                writeln!(
                    svg,
                    r#"<line class="edge spouse" x1="{}" y1="{}" x2="{}" y2="{}" />"#,
                    left.x + left.width,
                    left.y + left.height / 2.0,
                    right.x,
                    right.y + right.height / 2.0
                )
                .unwrap();
            }
            EdgeKind::Father | EdgeKind::Mother => {
                // Elbow: down from the parent, across, down into the child.
                let x1 = source.x + source.width / 2.0;
                let y1 = source.y + source.height;
                let x2 = target.x + target.width / 2.0;
                let y2 = target.y;
                let mid_y = (y1 + y2) / 2.0;
                writeln!(
                    svg,
                    r#"<path class="edge" d="M {} {} L {} {} L {} {} L {} {}" />"#,
                    x1, y1, x1, mid_y, x2, mid_y, x2, y2
                )
                .unwrap();
            }
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutEngine, RenderContext};
    use crate::model::Member;

    fn family() -> Vec<Member> {
        vec![
            Member::new("f", "김철수", Gender::Male, 1)
                .with_spouse("m")
                .born("1930")
                .died("2001"),
            Member::new("m", "이영희", Gender::Female, 1).with_spouse("f"),
            Member::new("c", "Tom & Jerry", Gender::Male, 2).with_father("f"),
        ]
    }

    #[test]
    fn test_render_basic() {
        let layout = LayoutEngine::default().layout(&family());
        let svg = SvgRenderer::default().render(&layout);

        assert!(svg.contains("<svg"));
        assert!(svg.contains("김철수"));
        assert!(svg.contains("1930 - 2001"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_render_edges_and_escaping() {
        let layout = LayoutEngine::default().layout(&family());
        let svg = SvgRenderer::default().render(&layout);

        assert!(svg.contains(r#"class="edge spouse""#));
        assert!(svg.contains("<path class=\"edge\""));
        assert!(svg.contains("Tom &amp; Jerry"));
        assert!(svg.contains("card male deceased"));
    }

    #[test]
    fn test_render_dark_mode() {
        let ctx: RenderContext = RenderContext {
            dark_mode: true,
            on_select: None,
        };
        let layout = LayoutEngine::default().layout_with(&family(), &ctx);
        let svg = SvgRenderer::default().render(&layout);

        assert!(svg.contains(DARK.background));
    }

    #[test]
    fn test_render_empty() {
        let layout = LayoutEngine::default().layout(&[]);
        let svg = SvgRenderer::default().render(&layout);
        assert!(svg.starts_with("<svg"));
    }
}
