// Single-document rendering of the page: head resources, static transcript,
// and the chat widget script tags.

use askama::Template;
use serde::Serialize;

use crate::config::{Settings, SiteSettings, WidgetSettings};
use crate::content::{self, ContentBlock, HEADLINE, Inline, Piece};
use crate::models::Topic;

const STYLESHEET: &str = r#"
*{box-sizing:border-box;margin:0;padding:0}
html{scroll-behavior:smooth;scroll-padding-top:60px}
body{min-height:100vh;color:#fff;background:linear-gradient(to bottom right,#09090b,#27272a)}
main{max-width:36rem;padding:7rem 1rem 6rem}
@media (min-width:640px){main{padding:4rem 2rem 6rem}}
.mono{font-family:ui-monospace,SFMono-Regular,Menlo,Consolas,monospace}
h1{font-size:1.5rem;line-height:2rem;margin-bottom:3rem}
@media (min-width:640px){h1{font-size:1.875rem;line-height:2.25rem;margin-bottom:4rem}}
ul.menu{list-style:none;color:#a1a1aa;margin:.5rem 0 2rem}
ul.menu li+li{margin-top:.25rem}
a{color:#34d399;text-decoration:none}
a:hover{text-decoration:underline}
.interaction{display:none;margin-bottom:2rem}
.interaction:target{display:block}
.prompt{color:#a1a1aa;margin-bottom:.5rem}
.window{background:rgba(24,24,27,.8);padding:1.5rem;border-radius:.5rem;color:#d4d4d8;margin-bottom:1.5rem;line-height:1.625}
.window ul{list-style:none;margin-top:1rem}
.window ul li+li{margin-top:.75rem}
.window ul li::before{content:"•";margin-right:.5rem}
.note{display:block;color:#a1a1aa;font-style:italic;font-size:.75rem;margin:.5rem 0 0 1.25rem}
.links{display:flex;gap:1.5rem;margin-top:1rem}
.bar{position:fixed;bottom:0;left:0;width:100%;padding:2rem 1rem 1rem;background:linear-gradient(to top,#09090b,transparent);color:#a1a1aa;display:flex;align-items:center}
@media (min-width:640px){.bar{padding:2rem 2rem 1rem}}
.bar a{color:inherit}
.bar a:hover{color:#34d399;text-decoration:none}
.bar .topic{display:none}
.caret{display:inline-block;margin-left:.5rem;width:.75rem;height:1.5rem;background:#34d399;animation:blink var(--blink-period) steps(1) infinite}
@keyframes blink{50%{opacity:0}}
"#;

/// The object the widget bundle reads from `window.embeddedChatbotConfig`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbeddedChatbotConfig<'a> {
    chatbot_id: &'a str,
    domain: &'a str,
}

struct Section {
    slug: &'static str,
    label: &'static str,
    menu_label: &'static str,
    body: &'static ContentBlock,
}

struct Widget<'a> {
    settings: &'a WidgetSettings,
    /// JSON already made safe for an inline script.
    config: String,
}

// The bottom bar holds one hidden label per topic; the label of the section
// currently targeted by the URL fragment is switched on in the style block.
// Widget configuration comes before the deferred bundle so the object exists
// when the bundle runs.
#[derive(Template)]
#[template(
    source = r##"<!DOCTYPE html>
<html lang="{{ site.lang }}">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width,initial-scale=1" />
<title>{{ site.title }}</title>
<meta name="description" content="{{ site.description }}" />
<meta name="generator" content="katfemtech {{ version }}" />
<link rel="preconnect" href="https://fonts.googleapis.com" />
<link rel="preconnect" href="https://fonts.gstatic.com" crossorigin />
<link rel="stylesheet" href="https://fonts.googleapis.com/css2?family={{ font_query }}:wght@400;600&amp;display=swap" />
<style>
:root{--blink-period:{{ blink_period_ms }}ms}
.font-body{font-family:'{{ font_css|safe }}',system-ui,sans-serif}
{{ stylesheet|safe }}
{%- for section in sections %}
main:has(#{{ section.slug }}:target) ~ .bar .t-{{ section.slug }}{display:inline}
{%- endfor %}
</style>
</head>
<body class="font-body" id="top">
<main>
<h1 class="mono">{% for line in headline %}{{ line }}{% if !loop.last %} <br />{% endif %}{% endfor %}</h1>
{% call menu(sections) %}
{%- for section in sections %}
<section class="interaction mono" id="{{ section.slug }}">
<div class="prompt">main page/{{ section.label }} &gt;</div>
<div class="window">
{%- for piece in section.body.pieces %}
{%- match piece %}
{%- when Piece::Paragraph with (inlines) %}
<p>{% call inline_runs(inlines) %}</p>
{%- when Piece::Bullets with (bullets) %}
<ul>
{%- for bullet in bullets %}
<li>{% call inline_runs(bullet.inlines) %}{% match bullet.note %}{% when Some with (note) %}<span class="note">{{ note }}</span>{% when None %}{% endmatch %}</li>
{%- endfor %}
</ul>
{%- when Piece::LinkRow with (links) %}
<div class="links">{% for link in links %}{% call link_tag(link) %}{% endfor %}</div>
{%- endmatch %}
{%- endfor %}
</div>
{% call menu(sections) %}
</section>
{%- endfor %}
</main>
<nav class="bar mono"><span><a href="#top">main page</a>{% for section in sections %}<span class="topic t-{{ section.slug }}">/{{ section.label }}</span>{% endfor %} &gt;</span><span class="caret"></span></nav>
{%- match widget %}
{%- when Some with (widget) %}
<script id="chatbase-config">window.embeddedChatbotConfig = {{ widget.config|safe }};</script>
<script id="chatbase-embed" src="{{ widget.settings.script_src }}" data-chatbot-id="{{ widget.settings.chatbot_id }}" data-domain="{{ widget.settings.domain }}" defer></script>
{%- when None %}
{%- endmatch %}
</body>
</html>
{%- macro menu(sections) %}
<ul class="menu mono">
{%- for section in sections %}
<li><a href="#{{ section.slug }}">{{ section.menu_label }}</a></li>
{%- endfor %}
</ul>
{%- endmacro %}
{%- macro inline_runs(inlines) %}
{%- for inline in inlines %}
{%- match inline %}
{%- when Inline::Text with (text) %}{{ text }}
{%- when Inline::Link with (link) %}{% call link_tag(link) %}
{%- when Inline::Break %}<br />
{%- endmatch %}
{%- endfor %}
{%- endmacro %}
{%- macro link_tag(link) -%}
<a href="{{ link.href }}"{% if !link.is_mail() %} target="_blank" rel="noopener noreferrer"{% endif %}{% match link.download %}{% when Some with (file) %} download="{{ file }}"{% when None %}{% endmatch %}>{{ link.label }}</a>
{%- endmacro %}
"##,
    ext = "html"
)]
struct PageTemplate<'a> {
    site: &'a SiteSettings,
    version: &'static str,
    font_query: String,
    font_css: String,
    blink_period_ms: u64,
    stylesheet: &'static str,
    headline: &'static [&'static str],
    sections: Vec<Section>,
    widget: Option<Widget<'a>>,
}

pub fn render_document(settings: &Settings) -> Result<String, anyhow::Error> {
    let widget = if settings.widget.enabled {
        Some(Widget {
            settings: &settings.widget,
            config: widget_config(&settings.widget)?,
        })
    } else {
        None
    };

    let page = PageTemplate {
        site: &settings.site,
        version: env!("CARGO_PKG_VERSION"),
        font_query: settings.site.font_family.trim().replace(' ', "+"),
        font_css: sanitize_css_string(&settings.site.font_family),
        blink_period_ms: settings.timing.cursor_blink_ms * 2,
        stylesheet: STYLESHEET.trim(),
        headline: &HEADLINE,
        sections: Topic::ALL
            .into_iter()
            .map(|topic| Section {
                slug: topic.slug(),
                label: topic.label(),
                menu_label: topic.menu_label(),
                body: content::block(topic),
            })
            .collect(),
        widget,
    };
    Ok(page.render()?)
}

/// Serialized `embeddedChatbotConfig`, with `</` broken up so it cannot close the script.
fn widget_config(widget: &WidgetSettings) -> Result<String, serde_json::Error> {
    let config = EmbeddedChatbotConfig {
        chatbot_id: &widget.chatbot_id,
        domain: &widget.domain,
    };
    Ok(serde_json::to_string(&config)?.replace("</", "<\\/"))
}

/// Keeps a font family name from breaking out of its quoted CSS string.
fn sanitize_css_string(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '\'' | '\\' | '<' | '>' | '{' | '}' | ';')).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BLUEPRINT;

    fn settings() -> Settings {
        toml::from_str(BLUEPRINT).unwrap()
    }

    #[test]
    fn widget_config_precedes_bundle() {
        let html = render_document(&settings()).unwrap();
        let config = html.find(r#"id="chatbase-config""#).unwrap();
        let bundle = html.find(r#"id="chatbase-embed""#).unwrap();
        assert!(config < bundle);
        assert!(html.contains(
            r#"window.embeddedChatbotConfig = {"chatbotId":"75r32o3VrAg1IeD9w42cu","domain":"www.chatbase.co"};"#
        ));
        assert!(html.contains(r#"data-chatbot-id="75r32o3VrAg1IeD9w42cu""#));
        assert!(html.contains(r#"data-domain="www.chatbase.co" defer"#));
        assert!(html.contains("embed.min.js"));
    }

    #[test]
    fn widget_can_be_disabled() {
        let mut settings = settings();
        settings.widget.enabled = false;
        let html = render_document(&settings).unwrap();
        assert!(!html.contains("chatbase"));
    }

    #[test]
    fn head_carries_title_font_and_blink_period() {
        let html = render_document(&settings()).unwrap();
        assert!(html.contains("<title>Katerina - Product Manager</title>"));
        assert!(html.contains("family=Inter:wght@400;600"));
        assert!(html.contains("--blink-period:1060ms"));
        assert!(html.contains(".font-body{font-family:'Inter',system-ui,sans-serif}"));
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
    }

    #[test]
    fn every_topic_has_a_section_and_menu_link() {
        let html = render_document(&settings()).unwrap();
        for topic in Topic::ALL {
            assert!(html.contains(&format!(r#"id="{}""#, topic.slug())));
            assert!(html.contains(&format!(r##"<a href="#{}">{}</a>"##, topic.slug(), topic.menu_label())));
        }
        assert!(html.contains("main page/playing with ai &gt;"));
        assert!(html.contains(r#"download="Katerina_Stepanova_CV.pdf""#));
        assert!(html.contains(r#"<a href="mailto:katyaresearcher@gmail.com">email</a>"#));
        assert!(html.contains(r#"<span class="note">"#));
    }

    #[test]
    fn bottom_bar_names_the_open_topic() {
        let html = render_document(&settings()).unwrap();
        let bar_start = html.find(r#"<nav class="bar mono">"#).unwrap();
        let bar = &html[bar_start..];
        assert!(bar.contains(r##"<a href="#top">main page</a>"##));
        for topic in Topic::ALL {
            let label = format!(r#"<span class="topic t-{}">/{}</span>"#, topic.slug(), topic.label());
            assert!(bar.contains(&label), "{label}");
            let rule = format!("main:has(#{slug}:target) ~ .bar .t-{slug}{{display:inline}}", slug = topic.slug());
            assert!(html.contains(&rule), "{rule}");
        }
        assert!(html.contains(".bar .topic{display:none}"));
    }

    #[test]
    fn hostile_settings_are_escaped() {
        let mut settings = settings();
        settings.site.title = "<script>alert(1)</script>".into();
        settings.site.font_family = "Inter'}body{display:none".into();
        settings.widget.domain = "x</script><script>".into();
        let html = render_document(&settings).unwrap();
        assert!(html.contains("<title>&lt;script&gt;alert(1)"));
        assert!(!html.contains("<script>alert(1)"));
        assert!(!html.contains("x</script><script>"));
        assert!(html.contains("font-family:'Interbodydisplay:none',"));
    }
}
