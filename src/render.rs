//! Generated file templates.

/// Warning placed at the top of every generated file.
pub const BANNER: &str =
    "/** IMPORTANT NOTE! This file is generated automatically. Any changes will be overwritten */";

/// Doc comment above the primary enum. Empty text renders nothing, each
/// line of the text gets its own ` * ` row and `*/` is escaped.
pub fn render_comment(text: Option<&str>) -> String {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return String::new();
    };
    let mut output = String::from("/**\n");
    for line in text.replace("*/", "*\\/").lines() {
        let line = line.trim();
        if line.is_empty() {
            output.push_str(" *\n");
        } else {
            output.push_str(&format!(" * {}\n", line));
        }
    }
    output.push_str(" */\n");
    output
}

fn render_enum(name: &str, body: &str) -> String {
    if body.is_empty() {
        format!("export enum {} {{\n}}\n", name)
    } else {
        format!("export enum {} {{\n{}\n}}\n", name, body)
    }
}

/// Secondary enum declaration. An empty or absent name renders nothing.
pub fn render_description(name: Option<&str>, body: &str) -> String {
    match name.filter(|n| !n.is_empty()) {
        Some(name) => format!("\n{}", render_enum(name, body)),
        None => String::new(),
    }
}

/// Full generated file: banner, comment block, primary enum, description
/// block. Blocks are expected pre-rendered by [`render_comment`] and
/// [`render_description`].
pub fn render_file(enum_name: &str, body: &str, comment_block: &str, description_block: &str) -> String {
    let mut output = String::new();
    output.push_str(BANNER);
    output.push_str("\n\n");
    output.push_str(comment_block);
    output.push_str(&render_enum(enum_name, body));
    output.push_str(description_block);
    output
}

/// Index file re-exporting every generated enum, then every extra name not
/// already produced by a job.
pub fn render_index<S: AsRef<str>, E: AsRef<str>>(job_names: &[S], extras: &[E]) -> String {
    let mut output = String::new();
    output.push_str(BANNER);
    output.push_str("\n\n");

    let generated = job_names.iter().map(|j| AsRef::<str>::as_ref(j));
    let manual = extras
        .iter()
        .map(|e| AsRef::<str>::as_ref(e))
        .filter(|e| !job_names.iter().any(|j| AsRef::<str>::as_ref(j) == *e));
    for name in generated.chain(manual) {
        output.push_str(&format!("export * from './{}';\n", name));
    }
    output
}
