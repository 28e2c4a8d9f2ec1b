use crate::models::resume::{DataPoint, Resume};

/// Renders a résumé as Markdown in model order.
///
/// Sort first with `document::ordering` if `sort_value` order is wanted.
/// Single-point entries never get a bullet block.
pub fn render_markdown(resume: &Resume) -> String {
    let mut md = String::new();

    if !resume.full_name.is_empty() {
        md.push_str(&format!("# {}\n\n", single_line(&resume.full_name)));
    }
    if !resume.headline.is_empty() {
        md.push_str(&format!("{}\n\n", resume.headline));
    }

    let contact: Vec<&str> = [resume.email.as_str(), resume.phone_number.as_str()]
        .into_iter()
        .chain(resume.extra_infos.iter().map(String::as_str))
        .filter(|part| !part.trim().is_empty())
        .collect();
    if !contact.is_empty() {
        md.push_str(&contact.join(" • "));
        md.push_str("\n\n");
    }

    for section in &resume.sections {
        md.push_str(&format!("## {}\n\n", single_line(&section.name)));
        for dp in &section.data_points {
            render_data_point(&mut md, dp);
        }
    }

    md
}

/// Heading lines end at the first newline in Markdown; fold line breaks into spaces.
fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

fn render_data_point(md: &mut String, dp: &DataPoint) {
    md.push_str(&format!("### {}\n", single_line(&dp.heading)));

    let meta: Vec<&str> = [dp.job_title.as_str(), dp.date_range.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();
    if !meta.is_empty() {
        md.push_str(&format!("*{}*\n", meta.join(" | ")));
    }
    if !dp.description.is_empty() {
        md.push_str(&format!("{}\n", dp.description));
    }
    if !dp.is_single_point {
        for bullet in &dp.bullet_points {
            md.push_str(&format!("- {bullet}\n"));
        }
    }
    md.push('\n');
}
