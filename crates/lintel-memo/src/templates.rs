//! Table templates for memo pages.

use minijinja::{context, Environment};

/// Header shown above either table layout.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Header {
    /// Page title
    pub title: String,
    /// Optional subheading; absent means no element is emitted
    pub subtitle: Option<String>,
}

/// One row of the compact post-list layout.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PostRow {
    pub date: String,
    pub url: String,
    pub title: String,
}

/// One cell of the custom layout.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Cell {
    /// Cell text
    pub value: String,
    /// Positional CSS class, if configured for this column
    pub class: Option<String>,
    /// Link target; set only on the row's linking cell
    pub href: Option<String>,
}

/// One row of the custom layout.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Row {
    pub cells: Vec<Cell>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the two table templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("bootstrap.html".to_string(), BOOTSTRAP_TEMPLATE.to_string())
            .expect("Failed to add bootstrap template");

        env.add_template_owned("custom.html".to_string(), CUSTOM_TEMPLATE.to_string())
            .expect("Failed to add custom template");

        Self { env }
    }

    /// Render the compact post-list table.
    pub fn render_bootstrap(
        &self,
        header: &Header,
        posts: &[PostRow],
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("bootstrap.html")?;

        tmpl.render(context! {
            title => &header.title,
            subtitle => &header.subtitle,
            posts => posts,
        })
    }

    /// Render the generic multi-column table.
    pub fn render_custom(
        &self,
        header: &Header,
        table_class: &str,
        columns: &[String],
        rows: &[Row],
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("custom.html")?;

        tmpl.render(context! {
            title => &header.title,
            subtitle => &header.subtitle,
            table_class => table_class,
            columns => columns,
            rows => rows,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BOOTSTRAP_TEMPLATE: &str = r##"<header class="post-header">
  <h1 class="post-title">{{ title }}</h1>
  {% if subtitle %}<p class="post-description">{{ subtitle }}</p>
  {% endif %}</header>
<article>
  <div class="news">
    <div class="table-responsive" style="max-height: 60vw">
      <table class="table table-sm table-borderless">
        {% for post in posts %}<tr>
          <th scope="row" style="width: 20%;font-family: monospace;">{{ post.date }}</th>
          <td> <a href="{{ post.url }}">{{ post.title }}</a> </td>
        </tr>
        {% endfor %}</table>
    </div>
  </div>
</article>"##;

const CUSTOM_TEMPLATE: &str = r##"<header class="post-header">
  <h1 class="post-title">{{ title }}</h1>
  {% if subtitle %}<p class="post-description">{{ subtitle }}</p>
  {% endif %}</header>
<article>
  <table class="{{ table_class }}">
    <thead>
      <tr>
        {% for col in columns %}<th>{{ col }}</th>{% endfor %}
      </tr>
    </thead>
    <tbody>
      {% for row in rows %}<tr>
        {% for cell in row.cells %}<td{% if cell.class %} class="{{ cell.class }}"{% endif %}>{% if cell.href %}<a href="{{ cell.href }}">{{ cell.value }}</a>{% else %}{{ cell.value }}{% endif %}</td>
        {% endfor %}</tr>
      {% endfor %}</tbody>
  </table>
</article>"##;
