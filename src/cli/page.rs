//! Starter page written by `shelf init`.

use crate::core::markup::escape;

/// Grid styles for the layout hint classes
pub const SHELF_CSS: &str = r#"
#shelf {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(220px, 1fr));
    grid-auto-rows: 220px;
    grid-auto-flow: dense;
    gap: 12px;
}
.shelf-item {
    display: flex;
    flex-direction: column;
    overflow: hidden;
    border: 1px solid #ddd;
    padding: 8px;
}
.shelf-item img {
    width: 100%;
    height: 100%;
    object-fit: cover;
    min-height: 0;
}
.shelf-item time {
    margin-top: auto;
    font-size: 0.75rem;
    color: #666;
}
.bento-large {
    grid-column: span 2;
    grid-row: span 2;
}
.bento-wide {
    grid-column: span 2;
}
"#;

/// A page with an empty target element
pub fn starter_page(title: &str, target_id: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <h1>{title}</h1>
    <div id="{id}"></div>
</body>
</html>
"#,
        title = escape(title),
        css = SHELF_CSS.replace("#shelf", &format!("#{}", target_id)),
        id = escape(target_id),
    )
}
