use schemalink::schemalink_core::{CUSTOM_STYLE_NAME, REFERENCE_STYLES};

use crate::cli::ListFormat;

pub fn run(format: &ListFormat) -> Result<(), i32> {
    match format {
        ListFormat::Text => write_text(),
        ListFormat::Json => write_json(),
    }
    Ok(())
}

fn write_text() {
    println!("name\torder\texample");
    for style in REFERENCE_STYLES {
        println!("{}\t{}\t{}", style.name, style.display_order, style.example);
    }
    println!("{CUSTOM_STYLE_NAME}\t(user template)\t{{P}}/{{C}}/{{F}} placeholders or raw regex");
}

fn write_json() {
    let styles: Vec<serde_json::Value> = REFERENCE_STYLES
        .iter()
        .map(|style| {
            serde_json::json!({
                "name": style.name,
                "pattern": style.pattern,
                "order": style.display_order,
                "example": style.example,
            })
        })
        .collect();
    println!("{}", serde_json::to_string(&styles).unwrap());
}
