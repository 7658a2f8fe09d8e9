//! Renders [`Metadata`] as the "online ad" shown next to the processed photos.

use std::fmt::Write as FmtWrite;

use crate::html::{Markup, SafeUrl};
use crate::types::Metadata;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "€";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Prepended verbatim to the price.
    pub currency_symbol: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

/// Renders the online-ad HTML fragment, or an empty string when there is no metadata.
pub fn render_online_ad(metadata: Option<&Metadata>, options: &RenderOptions) -> String {
    let Some(m) = metadata else {
        return String::new();
    };

    let price = m
        .price
        .as_ref()
        .map(|p| p.to_string())
        .unwrap_or_default();

    let mut html = Markup::new();
    html.open("div", &[("class", "space-y-2".into())]).newline();
    html.element(
        "h2",
        &[("class", "text-2xl font-bold text-gray-800".into())],
        &m.title,
    )
    .newline();

    html.open("div", &[("class", "flex flex-wrap items-center gap-4".into())])
        .newline();
    html.element(
        "span",
        &[(
            "class",
            "inline-block bg-blue-100 text-blue-800 text-lg font-semibold px-3 py-1 rounded".into(),
        )],
        &format!("{}{}", options.currency_symbol, price),
    )
    .newline();
    html.element(
        "span",
        &[("class", "inline-block bg-gray-100 text-gray-800 px-3 py-1 rounded".into())],
        &format!("Size: {}", m.size),
    )
    .newline();
    html.element(
        "span",
        &[("class", "inline-block bg-yellow-100 text-yellow-800 px-3 py-1 rounded".into())],
        &m.categories.join(", "),
    )
    .newline();
    html.close("div").newline();

    html.open("div", &[("class", "flex flex-wrap items-center gap-2".into())])
        .newline();
    html.element("span", &[("class", "font-medium".into())], "Colors:")
        .newline();
    for (i, color) in m.colors.iter().enumerate() {
        if i > 0 {
            html.raw(" ");
        }
        let style = format!("background:{color}");
        html.element(
            "span",
            &[
                (
                    "class",
                    "inline-block w-4 h-4 rounded-full border border-gray-300".into(),
                ),
                ("style", (&style).into()),
                ("title", color.into()),
            ],
            "",
        );
    }
    html.newline().close("div").newline();

    html.open("div", &[]);
    html.element("span", &[("class", "font-medium".into())], "Materials:");
    html.text(" ").text(&m.materials.join(", "));
    html.close("div").newline();

    html.open("div", &[]).newline();
    html.element("span", &[("class", "font-medium".into())], "Brand:")
        .newline();
    match m.brand_link_domain().and_then(SafeUrl::https) {
        Some(url) => {
            html.element(
                "a",
                &[
                    ("href", (&url).into()),
                    ("class", "text-blue-600 underline".into()),
                    ("target", "_blank".into()),
                    ("rel", "noopener noreferrer".into()),
                ],
                &m.brand,
            );
        }
        None => {
            html.text(&m.brand);
        }
    }
    html.newline().close("div").newline();

    html.element("p", &[("class", "mt-2 text-gray-700".into())], &m.description)
        .newline();
    html.close("div");
    html.into_string()
}

/// Plain-text listing suitable for pasting into a marketplace form.
pub fn metadata_to_markdown(m: &Metadata, options: &RenderOptions) -> String {
    let price = m
        .price
        .as_ref()
        .map(|p| p.to_string())
        .unwrap_or_default();

    let mut md = String::new();
    writeln!(md, "## {}", m.title).ok();
    writeln!(md, "#### Price: {}{}", options.currency_symbol, price).ok();
    writeln!(md, "Size: {}\n", m.size).ok();
    writeln!(md, "Colors: {}\n", m.colors.join(", ")).ok();
    writeln!(md, "Materials: {}\n", m.materials.join(", ")).ok();
    writeln!(md, "Categories: {}\n", m.categories.join(", ")).ok();
    match m.brand_link_domain() {
        Some(domain) => writeln!(md, "Brand: [{}](https://{})\n", m.brand, domain).ok(),
        None => writeln!(md, "Brand: {}\n", m.brand).ok(),
    };
    writeln!(md, "\n{}", m.description).ok();
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Price;

    fn jacket() -> Metadata {
        Metadata {
            title: "Vintage denim jacket".into(),
            price: Some(Price::Amount(45.0)),
            size: "M".into(),
            categories: vec!["jackets".into(), "denim".into()],
            colors: vec!["blue".into(), "#ffffff".into()],
            materials: vec!["cotton".into()],
            brand: "Acme".into(),
            brand_domain: "shop.example.com".into(),
            description: "Barely worn.".into(),
        }
    }

    #[test]
    fn absent_metadata_renders_nothing() {
        assert_eq!(render_online_ad(None, &RenderOptions::default()), "");
    }

    #[test]
    fn renders_response_with_mistyped_fields() {
        let resp: crate::types::ProcessResponse = serde_json::from_str(
            r#"{"primary":"/a.png","metadata":{"title":"Boots","size":42,"colors":"blue","price":30}}"#,
        )
        .expect("parse response");

        let html = render_online_ad(resp.metadata.as_ref(), &RenderOptions::default());
        assert!(html.contains(">Size: 42</span>"));
        assert!(html.contains("style=\"background:blue\" title=\"blue\""));
        assert!(html.contains(">€30</span>"));
    }

    #[test]
    fn renders_all_sections() {
        let html = render_online_ad(Some(&jacket()), &RenderOptions::default());
        assert!(html.contains(">Vintage denim jacket</h2>"));
        assert!(html.contains(">€45</span>"));
        assert!(html.contains(">Size: M</span>"));
        assert!(html.contains(">jackets, denim</span>"));
        assert!(html.contains("style=\"background:blue\" title=\"blue\""));
        assert!(html.contains("style=\"background:#ffffff\""));
        assert!(html.contains("Materials:</span> cotton</div>"));
        assert!(html.contains("<p class=\"mt-2 text-gray-700\">Barely worn.</p>"));
    }

    #[test]
    fn one_swatch_per_color() {
        let html = render_online_ad(Some(&jacket()), &RenderOptions::default());
        assert_eq!(html.matches("rounded-full").count(), 2);
    }

    #[test]
    fn empty_sequences_render_as_empty_text() {
        let meta = Metadata {
            title: "Shirt".into(),
            ..Default::default()
        };
        let html = render_online_ad(Some(&meta), &RenderOptions::default());
        assert!(!html.contains("undefined"));
        assert!(!html.contains("null"));
        assert!(html.contains("rounded\"></span>"), "categories badge should be empty");
        assert!(html.contains("Materials:</span> </div>"));
        assert!(!html.contains("rounded-full"));
    }

    #[test]
    fn brand_with_sentinel_domain_is_plain_text() {
        let meta = Metadata {
            brand: "Acme".into(),
            brand_domain: "NA".into(),
            ..Default::default()
        };
        let html = render_online_ad(Some(&meta), &RenderOptions::default());
        assert!(html.contains("Acme"));
        assert!(!html.contains("<a "));
    }

    #[test]
    fn brand_with_domain_is_linked() {
        let html = render_online_ad(Some(&jacket()), &RenderOptions::default());
        assert!(html.contains("<a href=\"https://shop.example.com\""));
        assert!(html.contains("target=\"_blank\""));
        assert!(html.contains(">Acme</a>"));
    }

    #[test]
    fn field_values_are_escaped() {
        let meta = Metadata {
            title: "<img src=x onerror=alert(1)>".into(),
            colors: vec!["red' onmouseover='alert(1)".into()],
            brand: "<b>Acme</b>".into(),
            brand_domain: "NA".into(),
            description: "5 < 6 & 7 > 3".into(),
            ..Default::default()
        };
        let html = render_online_ad(Some(&meta), &RenderOptions::default());
        assert!(!html.contains("<img"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(html.contains("red&#x27; onmouseover=&#x27;alert(1)"));
        assert!(html.contains("5 &lt; 6 &amp; 7 &gt; 3"));
    }

    #[test]
    fn currency_symbol_is_configurable() {
        let options = RenderOptions {
            currency_symbol: "$".into(),
        };
        let html = render_online_ad(Some(&jacket()), &options);
        assert!(html.contains(">$45</span>"));
    }

    #[test]
    fn markdown_links_brand_unless_sentinel() {
        let md = metadata_to_markdown(&jacket(), &RenderOptions::default());
        assert!(md.starts_with("## Vintage denim jacket\n"));
        assert!(md.contains("#### Price: €45\n"));
        assert!(md.contains("Colors: blue, #ffffff"));
        assert!(md.contains("Brand: [Acme](https://shop.example.com)"));
        assert!(md.trim_end().ends_with("Barely worn."));

        let mut plain = jacket();
        plain.brand_domain = "NA".into();
        let md = metadata_to_markdown(&plain, &RenderOptions::default());
        assert!(md.contains("Brand: Acme\n"));
    }
}
