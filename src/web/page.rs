//! Server-rendered HTML for the single page.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::bridge::Outcome;
use crate::web::form::{
    DESCRIPTION_LABEL, DESCRIPTION_PLACEHOLDER, MODEL_LABEL, SUBMIT_LABEL, model_options,
};

pub const PAGE_TITLE: &str = "🛍️ Product Assistant";
pub const HEADING: &str = "🛍️ Product Price Finder Assistant";
pub const SUCCESS_BANNER: &str = "✅ Prediction Successful!";
pub const PENDING_TEXT: &str = "Thinking... 🤖";

/// What the result area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    Idle,
    Success {
        name: Option<String>,
        price: Option<String>,
    },
    Error(String),
    Warning(String),
}

impl From<&Outcome> for ResultView {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Success(product) => ResultView::Success {
                name: product.product_name.clone(),
                price: product.tentative_price_in_usd.clone(),
            },
            Outcome::Error(e) => ResultView::Error(e.to_string()),
            Outcome::Warning(msg) => ResultView::Warning((*msg).to_string()),
        }
    }
}

/// Everything needed to render the page once.
#[derive(Debug, Clone)]
pub struct PageView {
    pub selected_model: String,
    pub description: String,
    pub result: ResultView,
}

impl Default for PageView {
    fn default() -> Self {
        Self {
            selected_model: model_options().into_iter().next().unwrap_or_default(),
            description: String::new(),
            result: ResultView::Idle,
        }
    }
}

fn or_none(value: Option<&str>) -> &str {
    value.unwrap_or("None")
}

pub fn render_result(result: &ResultView) -> String {
    match result {
        ResultView::Idle => String::new(),
        ResultView::Success { name, price } => format!(
            concat!(
                "<div class=\"success\">{banner}</div>\n",
                "<h3>🧾 Result</h3>\n",
                "<p><strong>Product Name:</strong> <span id=\"product-name\">{name}</span></p>\n",
                "<p><strong>Estimated Price:</strong> $<span id=\"product-price\">{price}</span></p>\n"
            ),
            banner = SUCCESS_BANNER,
            name = encode_text(or_none(name.as_deref())),
            price = encode_text(or_none(price.as_deref())),
        ),
        ResultView::Error(message) => format!(
            "<div class=\"error\">❌ Error: {}</div>\n",
            encode_text(message)
        ),
        ResultView::Warning(message) => format!(
            "<div class=\"warning\">⚠️ {}</div>\n",
            encode_text(message)
        ),
    }
}

fn render_options(selected: &str) -> String {
    let mut out = String::new();
    for option in model_options() {
        let marker = if option == selected { " selected" } else { "" };
        let _ = writeln!(
            out,
            "<option value=\"{value}\"{marker}>{label}</option>",
            value = encode_double_quoted_attribute(&option),
            label = encode_text(&option),
        );
    }
    // Keep a resubmitted identifier selectable even when it isn't one of the named models.
    if !selected.is_empty() && !model_options().iter().any(|o| o == selected) {
        let _ = writeln!(
            out,
            "<option value=\"{value}\" selected>{label}</option>",
            value = encode_double_quoted_attribute(selected),
            label = encode_text(selected),
        );
    }
    out
}

const STYLE: &str = "body{font-family:sans-serif;max-width:960px;margin:2rem auto;padding:0 1rem}\
.columns{display:grid;grid-template-columns:1fr 2fr;gap:2rem}\
textarea{width:100%;min-height:8rem}select{width:100%}\
.success{background:#e6f4ea;padding:.75rem}.error{background:#fdecea;padding:.75rem}\
.warning{background:#fff8e1;padding:.75rem}";

pub fn render_page(view: &PageView) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="icon" href="data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>🛒</text></svg>">
<style>{style}</style>
</head>
<body>
<h1>{heading}</h1>
<p>Welcome to the <strong>Product Assistant App</strong> powered by <strong>Groq LLMs</strong> 🎯</p>
<form method="post" action="/" onsubmit="document.getElementById('pending').hidden=false;document.getElementById('result').hidden=true">
<div class="columns">
<div>
<h3>🤖 Select LLM Model</h3>
<label for="model">{model_label}</label>
<select id="model" name="model">
{options}</select>
</div>
<div>
<h3>✏️ Enter Product Description</h3>
<label for="description">{description_label}</label>
<textarea id="description" name="description" placeholder="{placeholder}">
{description}</textarea>
</div>
</div>
<button type="submit">{submit}</button>
</form>
<div id="pending" hidden>{pending}</div>
<div id="result">
{result}</div>
</body>
</html>
"#,
        title = encode_text(PAGE_TITLE),
        style = STYLE,
        heading = encode_text(HEADING),
        model_label = encode_text(MODEL_LABEL),
        options = render_options(&view.selected_model),
        description_label = encode_text(DESCRIPTION_LABEL),
        placeholder = encode_double_quoted_attribute(DESCRIPTION_PLACEHOLDER),
        description = encode_text(&view.description),
        submit = encode_text(SUBMIT_LABEL),
        pending = PENDING_TEXT,
        result = render_result(&view.result),
    )
}
