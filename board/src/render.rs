//! Markup for the page.
//!
//! Renderers only ever see view-models. Every piece of text that reaches the
//! markup, ids included, goes through [`escape`]. Buttons carry `data-action`
//! and `data-event-id` / `data-alert-id` attributes for the shell's delegated
//! handler instead of inline callbacks.

use crate::alerts::Alert;
use crate::types::Category;
use crate::view::{EditFormView, EventCard, EventDetailView, EventListView, ModalView, PageView};
use serde::Serialize;
use std::borrow::Cow;

/// Escape text for HTML content and double-quoted attributes
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(text)
}

/// The page's dynamic regions
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    /// Text of the event counter
    pub event_count: String,
    /// Inner markup of the catalog container
    pub catalog: String,
    /// Inner markup of the modal body; empty when closed
    pub modal: String,
    /// `aria-hidden` of the modal element
    pub modal_hidden: bool,
    /// Inner markup of the alert container
    pub alerts: String,
}

/// Turns a page view into output for the shell
pub trait Renderer: Send + Sync {
    /// Render every region of the page
    fn render(&self, page: &PageView) -> RenderedPage;
}

/// HTML renderer
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    /// Creates a new `HtmlRenderer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Catalog region: cards or the empty state
    #[must_use]
    pub fn catalog(list: &EventListView) -> String {
        if let Some(message) = &list.empty_message {
            return format!("<p class=\"empty-state\">{}</p>", escape(message));
        }
        list.cards.iter().map(Self::card).collect()
    }

    fn badges(card: &EventCard) -> String {
        let mut badges = format!(
            "<span class=\"badge badge-{}\">{}</span>",
            escape(card.category.as_str()),
            escape(&card.category_label)
        );
        if card.is_passed {
            badges.push_str("<span class=\"badge badge-passed\">Past</span>");
        }
        if card.is_full {
            badges.push_str("<span class=\"badge badge-full\">Full</span>");
        }
        badges
    }

    /// One catalog card
    #[must_use]
    pub fn card(card: &EventCard) -> String {
        let id = escape_owned(&card.id.to_string());
        let mut actions = format!(
            "<button type=\"button\" class=\"btn-secondary\" data-action=\"detail\" data-event-id=\"{id}\">Details</button>"
        );
        actions.push_str(&format!(
            "<button type=\"button\" class=\"btn-primary\" data-action=\"register\" data-event-id=\"{id}\"{}>Register</button>",
            if card.can_register { "" } else { " disabled" }
        ));
        if card.can_edit {
            actions.push_str(&format!(
                "<button type=\"button\" class=\"btn-ghost\" data-action=\"edit\" data-event-id=\"{id}\">Edit</button>"
            ));
        }

        format!(
            "<article class=\"event-card\" data-event-id=\"{id}\">\
             <header><h3>{title}</h3><div class=\"event-badges\">{badges}</div></header>\
             <p class=\"event-date\">{date}</p>\
             <p class=\"event-place\">{place}</p>\
             <p class=\"event-description\">{description}</p>\
             <p class=\"event-seats\">{seats}</p>\
             <div class=\"event-actions\">{actions}</div>\
             </article>",
            title = escape(&card.title),
            badges = Self::badges(card),
            date = escape(&card.date_label),
            place = escape(&card.place),
            description = escape(&card.description),
            seats = escape(&card.seats_label),
        )
    }

    fn detail(view: &EventDetailView) -> String {
        let card = &view.card;
        let registrants = if view.registrants.is_empty() {
            "<p class=\"muted\">No one registered yet.</p>".to_string()
        } else {
            let items: String = view
                .registrants
                .iter()
                .map(|r| format!("<li>{} ({})</li>", escape(&r.name), escape(&r.email)))
                .collect();
            format!(
                "<div class=\"registrations-list\"><h3>Registered ({})</h3><ul>{items}</ul></div>",
                view.registrants.len()
            )
        };
        let form = if view.registration_form {
            format!(
                "<div class=\"registration-form-section\"><h3>Register for this event</h3>\
                 <form class=\"form-grid\" data-form=\"registration\" data-event-id=\"{}\">\
                 <label>Full name<input type=\"text\" name=\"name\" required /></label>\
                 <label>Institutional email<input type=\"email\" name=\"email\" required placeholder=\"name@institution.edu\" /></label>\
                 <button type=\"submit\" class=\"btn-primary\">Register</button>\
                 </form></div>",
                escape_owned(&card.id.to_string())
            )
        } else {
            String::new()
        };

        format!(
            "<div class=\"event-detail\"><h2>{title}</h2>\
             <div class=\"detail-meta\">{badges}</div>\
             <div class=\"detail-content\"><p>{description}</p>\
             <dl class=\"detail-info-grid\">\
             <dt>Date and time</dt><dd>{date}</dd>\
             <dt>Place</dt><dd>{place}</dd>\
             <dt>Capacity</dt><dd>{seats}</dd>\
             </dl>{registrants}</div>{form}</div>",
            title = escape(&card.title),
            badges = Self::badges(card),
            description = escape(&card.description),
            date = escape(&card.date_label),
            place = escape(&card.place),
            seats = escape(&card.seats_label),
        )
    }

    fn category_options(selected: Category) -> String {
        Category::ALL
            .iter()
            .map(|category| {
                format!(
                    "<option value=\"{}\"{}>{}</option>",
                    escape(category.as_str()),
                    if *category == selected { " selected" } else { "" },
                    escape(category.label())
                )
            })
            .collect()
    }

    fn edit_form(view: &EditFormView) -> String {
        format!(
            "<div class=\"event-detail\"><h2>Edit event</h2>\
             <form class=\"form-grid\" data-form=\"edit\" data-event-id=\"{id}\">\
             <label>Title<input type=\"text\" name=\"title\" value=\"{title}\" required /></label>\
             <label>Description<textarea name=\"description\" required>{description}</textarea></label>\
             <label>Date and time<input type=\"datetime-local\" name=\"date\" value=\"{date}\" required /></label>\
             <label>Place<input type=\"text\" name=\"place\" value=\"{place}\" required /></label>\
             <label>Category<select name=\"category\" required>{options}</select></label>\
             <label>Capacity<input type=\"number\" name=\"capacity\" min=\"{min}\" value=\"{capacity}\" required /></label>\
             <div class=\"form-actions\">\
             <button type=\"submit\" class=\"btn-primary\">Save</button>\
             <button type=\"button\" class=\"btn-secondary\" data-action=\"cancel-edit\">Cancel</button>\
             </div></form></div>",
            id = escape_owned(&view.event_id.to_string()),
            title = escape(&view.title),
            description = escape(&view.description),
            date = escape(&view.date_value),
            place = escape(&view.place),
            options = Self::category_options(view.category),
            min = view.min_capacity,
            capacity = view.capacity,
        )
    }

    /// Modal body; empty when the modal is closed
    #[must_use]
    pub fn modal(modal: &ModalView) -> String {
        match modal {
            ModalView::Closed => String::new(),
            ModalView::Detail(view) => Self::detail(view),
            ModalView::Edit(view) => Self::edit_form(view),
        }
    }

    /// Alert region
    #[must_use]
    pub fn alerts(alerts: &[Alert]) -> String {
        alerts
            .iter()
            .map(|alert| {
                format!(
                    "<div class=\"alert alert-{kind}\" role=\"status\"><span>{message}</span>\
                     <button type=\"button\" class=\"alert-close\" data-action=\"dismiss-alert\" data-alert-id=\"{id}\" aria-label=\"Close\">&times;</button></div>",
                    kind = alert.kind.as_str(),
                    message = escape(&alert.message),
                    id = alert.id,
                )
            })
            .collect()
    }
}

fn escape_owned(text: &str) -> String {
    escape(text).into_owned()
}

impl Renderer for HtmlRenderer {
    fn render(&self, page: &PageView) -> RenderedPage {
        RenderedPage {
            event_count: page.events.count_label.clone(),
            catalog: Self::catalog(&page.events),
            modal: Self::modal(&page.modal),
            modal_hidden: page.modal_hidden,
            alerts: Self::alerts(&page.alerts),
        }
    }
}
