//! Writes TypeScript definitions of the API's response types for the front-end.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "./bindings.ts".to_string());

    specta_typescript::Typescript::default()
        .bigint(specta_typescript::BigIntExportBehavior::Number)
        .export_to(&out, &specta::export())?;

    println!("wrote {out}");
    Ok(())
}
