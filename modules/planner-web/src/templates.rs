use crate::pages::{EventForm, EventsPageView, Flash, RowView};

/// Render the events page: flash message, add form, and the events table.
pub fn render_events_page(view: &EventsPageView) -> String {
    let flash = match &view.flash {
        Some(Flash::Success(msg)) => format!(r#"<div class="flash flash-ok">{}</div>"#, html_escape(msg)),
        Some(Flash::Error(msg)) => format!(r#"<div class="flash flash-error">{}</div>"#, html_escape(msg)),
        None => String::new(),
    };

    let add_form = format!(
        r#"<div class="card">
    <h3>Add Event</h3>
    <form method="post" action="/events" class="event-form">
        {fields}
        <button type="submit" class="btn btn-primary">Add Event</button>
    </form>
</div>"#,
        fields = form_fields(&view.new_draft),
    );

    let mut rows = String::new();
    if view.rows.is_empty() {
        rows.push_str(r#"<tr><td colspan="6" class="empty">No events yet. Add one above.</td></tr>"#);
    }

    for row in &view.rows {
        match &view.editing {
            Some((id, draft)) if *id == row.id => rows.push_str(&edit_row(row.id, draft)),
            _ => rows.push_str(&display_row(row)),
        }
    }

    let content = format!(
        r#"<div class="container">
    {flash}
    {add_form}
    <div class="card">
        <h3>Events</h3>
        <table class="events">
            <thead><tr><th>Date</th><th>Time</th><th>Title</th><th>Location</th><th>Description</th><th></th></tr></thead>
            <tbody>{rows}</tbody>
        </table>
    </div>
</div>"#
    );

    build_page("Events", &content)
}

fn display_row(row: &RowView) -> String {
    format!(
        r#"<tr>
    <td>{date}</td><td>{time}</td><td>{title}</td><td>{location}</td><td class="desc">{description}</td>
    <td class="actions">
        <a href="/?edit={id}" class="btn">Edit</a>
        <form method="post" action="/events/{id}/delete" class="inline"><button type="submit" class="btn btn-danger">Delete</button></form>
    </td>
</tr>"#,
        id = row.id,
        date = html_escape(&row.date),
        time = html_escape(&row.time),
        title = html_escape(&row.title),
        location = html_escape(&row.location),
        description = html_escape(&row.description),
    )
}

fn edit_row(id: i32, draft: &EventForm) -> String {
    format!(
        r#"<tr class="editing"><td colspan="6">
    <form method="post" action="/events/{id}" class="event-form">
        {fields}
        <button type="submit" class="btn btn-primary">Save</button>
        <a href="/" class="btn">Cancel</a>
    </form>
</td></tr>"#,
        fields = form_fields(draft),
    )
}

fn form_fields(draft: &EventForm) -> String {
    format!(
        r#"<label>Title <input type="text" name="title" value="{title}"></label>
        <label>Date <input type="date" name="date" value="{date}"></label>
        <label>Time <input type="time" name="time" value="{time}"></label>
        <label>Location <input type="text" name="location" value="{location}"></label>
        <label class="wide">Description <textarea name="description" rows="2">{description}</textarea></label>"#,
        title = html_escape(&draft.title),
        date = html_escape(&draft.date),
        time = html_escape(&draft.time),
        location = html_escape(&draft.location),
        description = html_escape(&draft.description),
    )
}

// --- Helpers ---

fn build_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} — Event Planner</title>
<style>
*{{margin:0;padding:0;box-sizing:border-box;}}
body{{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;color:#1a1a1a;background:#fafafa;}}
.header{{background:#1a1a1a;color:#fff;padding:12px 24px;display:flex;align-items:center;justify-content:space-between;}}
.header h1{{font-size:18px;font-weight:600;}}
.container{{max-width:1100px;margin:0 auto;padding:24px;}}
.card{{background:#fff;border:1px solid #e0e0e0;border-radius:8px;padding:16px;margin-bottom:16px;}}
.card h3{{font-size:16px;margin-bottom:12px;}}
.event-form{{display:flex;flex-wrap:wrap;gap:12px;align-items:flex-end;}}
.event-form label{{display:flex;flex-direction:column;font-size:12px;color:#555;gap:4px;}}
.event-form label.wide{{flex-basis:100%;}}
.event-form input,.event-form textarea{{padding:6px 8px;border:1px solid #ccc;border-radius:4px;font-size:14px;font-family:inherit;}}
.btn{{display:inline-block;padding:6px 14px;border:1px solid #ccc;border-radius:4px;background:#fff;color:#1a1a1a;text-decoration:none;font-size:13px;cursor:pointer;}}
.btn-primary{{background:#0066cc;border-color:#0066cc;color:#fff;}}
.btn-primary:hover{{background:#004499;}}
.btn-danger{{color:#c62828;border-color:#ef9a9a;}}
.inline{{display:inline;}}
table.events{{width:100%;border-collapse:collapse;font-size:14px;}}
table.events th{{text-align:left;color:#888;font-weight:500;border-bottom:1px solid #e0e0e0;padding:6px 8px;}}
table.events td{{border-bottom:1px solid #f0f0f0;padding:8px;vertical-align:top;}}
table.events td.desc{{color:#555;}}
table.events td.actions{{white-space:nowrap;text-align:right;}}
table.events td.empty{{color:#888;text-align:center;padding:32px;}}
tr.editing td{{background:#f5f9ff;}}
.flash{{padding:8px 12px;border-radius:4px;font-size:13px;margin-bottom:16px;}}
.flash-ok{{background:#e8f5e9;border:1px solid #c8e6c9;color:#2e7d32;}}
.flash-error{{background:#fce4ec;border:1px solid #f8bbd0;color:#c62828;}}
</style>
</head>
<body>
<div class="header">
    <h1>Event Planner</h1>
</div>
{content}
</body>
</html>"#,
        title = html_escape(title),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
