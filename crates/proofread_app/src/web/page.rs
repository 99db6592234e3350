use askama::Template;
use proofread_core::{
    PageViewModel, ProviderChoice, ResultKind, DIALECT_SUGGESTIONS, STYLE_GUIDE_SUGGESTIONS,
};
use proofread_engine::{render_result, MarkdownRenderer};

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Proofreader</title>
    <style>
      body { font-family: system-ui, sans-serif; background: #f8fafc; color: #0f172a; margin: 0; }
      main { max-width: 52rem; margin: 0 auto; padding: 2.5rem 1rem; }
      label { display: block; font-weight: 600; margin-top: 1rem; }
      textarea, input, select { width: 100%; box-sizing: border-box; padding: 0.5rem; font: inherit; }
      .actions { display: flex; gap: 0.75rem; margin-top: 1.25rem; }
      .result { margin-top: 2rem; padding: 1rem 1.5rem; background: #fff; border-radius: 0.5rem; border-left: 4px solid #0f172a; }
      .result-error { border-left-color: #b91c1c; background: #fef2f2; }
    </style>
  </head>
  <body>
    <main>
      <h1>Proofreader</h1>
      <form method="post" action="/">
        <label for="text_content">Content</label>
        <textarea id="text_content" name="text_content" rows="12">
{{ text_content }}</textarea>

        <label for="dialect">Dialect</label>
        <input id="dialect" name="dialect" list="dialects" value="{{ dialect }}" />
        <datalist id="dialects">
          {% for option in dialects %}<option value="{{ option }}"></option>{% endfor %}
        </datalist>

        <label for="style_guide">Style guide</label>
        <input id="style_guide" name="style_guide" list="style_guides" value="{{ style_guide }}" />
        <datalist id="style_guides">
          {% for option in style_guides %}<option value="{{ option }}"></option>{% endfor %}
        </datalist>

        <label for="model_choice">Model</label>
        <select id="model_choice" name="model_choice">
          <option value="gemini"{% if gemini_selected %} selected{% endif %}>Gemini</option>
          <option value="openai"{% if openai_selected %} selected{% endif %}>OpenAI{% if !openai_available %} (not configured){% endif %}</option>
        </select>

        <div class="actions">
          <button type="submit" name="action" value="count">Word Count Only</button>
          <button type="submit" name="action" value="proofread">Proofread Content</button>
        </div>
      </form>
      {% if has_result %}
      <section id="result" class="{{ result_class }}">
        {{ result_html|safe }}
      </section>
      {% endif %}
    </main>
  </body>
</html>"#,
    ext = "html"
)]
struct IndexTemplate<'a> {
    text_content: &'a str,
    dialect: &'a str,
    style_guide: &'a str,
    dialects: &'a [&'a str],
    style_guides: &'a [&'a str],
    gemini_selected: bool,
    openai_selected: bool,
    openai_available: bool,
    has_result: bool,
    result_class: &'static str,
    // Produced by the markdown renderer, which escapes raw HTML.
    result_html: String,
}

pub(crate) fn render_page(
    view: &PageViewModel,
    renderer: &dyn MarkdownRenderer,
    openai_available: bool,
) -> Result<String, askama::Error> {
    let rendered = view
        .result
        .as_ref()
        .and_then(|result| {
            render_result(renderer, &result.markdown).map(|rendered| (result.kind, rendered))
        });

    let (has_result, result_class, result_html) = match rendered {
        Some((kind, result)) => (true, class_for(kind), result.rendered_html),
        None => (false, "", String::new()),
    };

    IndexTemplate {
        text_content: &view.text_content,
        dialect: &view.dialect,
        style_guide: &view.style_guide,
        dialects: DIALECT_SUGGESTIONS,
        style_guides: STYLE_GUIDE_SUGGESTIONS,
        gemini_selected: view.model_choice == ProviderChoice::Gemini,
        openai_selected: view.model_choice == ProviderChoice::OpenAi,
        openai_available,
        has_result,
        result_class,
        result_html,
    }
    .render()
}

fn class_for(kind: ResultKind) -> &'static str {
    match kind {
        ResultKind::WordCount => "result result-count",
        ResultKind::Proofread { .. } => "result result-proofread",
        ResultKind::Error => "result result-error",
    }
}
