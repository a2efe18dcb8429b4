//! HTML renderer for the monthly activity form
//!
//! Takes the fully resolved document and substitutes its strings into a
//! fixed-layout pt-BR form: a summary card with the participant fields and
//! an entry table underneath. The written file is the boundary; turning the
//! markup into PDF bytes is left to whatever opens it.

use std::path::PathBuf;

use async_trait::async_trait;
use fieldlog_core::export::ports::DocumentExporter;
use fieldlog_core::export::ReportDocument;
use fieldlog_domain::{FieldLogError, Result as DomainResult};
use tokio::fs;
use tracing::info;

use crate::errors::InfraError;

/// Exporter writing `relatorio-{month}.html` into a configured directory
pub struct HtmlExporter {
    output_dir: PathBuf,
}

impl HtmlExporter {
    /// Create an exporter targeting the given output directory
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }
}

#[async_trait]
impl DocumentExporter for HtmlExporter {
    async fn export(&self, document: &ReportDocument) -> DomainResult<PathBuf> {
        let html = render_form(document);
        let path = self.output_dir.join(format!("relatorio-{}.html", document.month));

        fs::create_dir_all(&self.output_dir).await.map_err(map_io_error)?;
        fs::write(&path, html).await.map_err(map_io_error)?;

        info!(path = %path.display(), month = %document.month, "report form written");

        Ok(path)
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Render the full HTML page for one document
fn render_form(document: &ReportDocument) -> String {
    let title = format!("Relatório — {}", escape_html(&document.period_label));

    let mut summary = String::new();
    summary_row(&mut summary, "Nome", &escape_html(&document.participant_name));
    summary_row(&mut summary, "Período", &escape_html(&document.period_label));
    // Generating a report at all means field service happened, so the form
    // always ships with the box ticked.
    let participated =
        if document.participated { "checked disabled" } else { "disabled" };
    summary_row(
        &mut summary,
        "Participou no ministério",
        &format!("<input type=\"checkbox\" {participated} />"),
    );
    summary_row(
        &mut summary,
        "Número de estudos bíblicos diferentes dirigidos",
        &document.study_count.to_string(),
    );
    if let Some(hours) = document.hours {
        summary_row(&mut summary, "Horas", &hours.to_string());
    }
    summary_row(&mut summary, "Observações", &escape_html(&document.observations));

    let mut rows = String::new();
    for row in &document.rows {
        rows.push_str(&format!(
            "        <tr>\n          <td>{}</td>\n          \
             <td class=\"right\">{}</td>\n          <td>{}</td>\n        </tr>\n",
            escape_html(&row.date),
            row.hours,
            row.label
        ));
    }
    if rows.is_empty() {
        rows.push_str("        <tr><td colspan=\"3\">Sem anotações neste mês.</td></tr>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="UTF-8" />
<meta name="viewport" content="width=device-width, initial-scale=1"/>
<title>{title}</title>
<style>
  * {{ box-sizing: border-box; }}
  body {{ font-family: -apple-system, system-ui, Segoe UI, Roboto, Arial, sans-serif; margin: 24px; color: #111; }}
  h1 {{ font-size: 22px; margin: 0 0 4px; }}
  .muted {{ color: #666; font-size: 12px; }}
  .card {{ border: 1px solid #e5e7eb; border-radius: 12px; padding: 16px; margin-top: 12px; }}
  .row {{ display: flex; justify-content: space-between; padding: 6px 0; border-bottom: 1px solid #f0f0f0; font-size: 13px; }}
  .label {{ color: #374151; }}
  table {{ width: 100%; border-collapse: collapse; margin-top: 8px; }}
  th, td {{ padding: 10px 8px; border-bottom: 1px solid #f0f0f0; font-size: 13px; }}
  th {{ text-align: left; background: #fafafa; }}
  .right {{ text-align: right; }}
  .footer {{ margin-top: 18px; font-size: 11px; color: #666; }}
</style>
</head>
<body>
  <h1>{title}</h1>
  <div class="muted">Gerado em {generated_at}</div>

  <div class="card">
{summary}  </div>

  <div class="card">
    <table>
      <thead>
        <tr>
          <th>Data</th>
          <th class="right">Horas</th>
          <th>Tipo</th>
        </tr>
      </thead>
      <tbody>
{rows}      </tbody>
    </table>
  </div>

  <div class="footer">Relatório {month}</div>
</body>
</html>
"#,
        title = title,
        generated_at = escape_html(&document.generated_at),
        summary = summary,
        rows = rows,
        month = escape_html(&document.month),
    )
}

fn summary_row(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!(
        "    <div class=\"row\"><span class=\"label\">{label}</span><span>{value}</span></div>\n"
    ));
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// =============================================================================
// Error Mapping
// =============================================================================

fn map_io_error(err: std::io::Error) -> FieldLogError {
    FieldLogError::from(InfraError::from(err))
}

// =============================================================================
// Tests
// =============================================================================
