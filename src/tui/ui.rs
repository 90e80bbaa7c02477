use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::{App, SidebarTab};
use crate::i18n::Strings;
use crate::models::{ArticleViewModel, PageOutcome};
use crate::session::DwellState;

pub fn draw(frame: &mut Frame, app: &App) {
    // Main horizontal split: 2/3 article, 1/3 sidebar
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(frame.area());

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Breadcrumb
            Constraint::Min(0),    // Article
            Constraint::Length(1), // Status line
        ])
        .split(main_chunks[0]);

    render_breadcrumb(frame, app, left_chunks[0]);
    match &app.page {
        Some(PageOutcome::Article(page)) => render_article(frame, app, page, left_chunks[1]),
        Some(PageOutcome::NotFound(_)) => render_not_found(frame, app, left_chunks[1]),
        None => render_loading(frame, left_chunks[1]),
    }
    render_status(frame, app, left_chunks[2]);

    if let Some(page) = app.page.as_ref().and_then(|p| p.view_model()) {
        render_sidebar(frame, app, page, main_chunks[1]);
    } else {
        frame.render_widget(Block::default().borders(Borders::ALL), main_chunks[1]);
    }

    if app.show_help {
        render_help(frame);
    }
}

fn render_breadcrumb(frame: &mut Frame, app: &App, area: Rect) {
    let strings = app.strings();
    let line = match app.page.as_ref().and_then(|p| p.view_model()) {
        Some(page) => Line::from(vec![
            Span::styled(format!("⌂ {}", strings.home), Style::default().fg(Color::Red)),
            Span::raw(" / "),
            Span::styled(
                page.category_name.clone(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" / "),
            Span::styled(page.breadcrumb.clone(), Style::default().fg(Color::Gray)),
        ]),
        None => Line::from(Span::styled(
            format!("⌂ {}", strings.home),
            Style::default().fg(Color::Red),
        )),
    };

    let heading = app
        .page
        .as_ref()
        .map(|p| p.meta().title.as_str())
        .unwrap_or(app.slug.as_str());
    let title = if app.is_loading {
        format!(" {} [{}] loading... ", heading, app.lang)
    } else {
        format!(" {} [{}] ", heading, app.lang)
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(paragraph, area);
}

fn article_lines(page: &ArticleViewModel, strings: &Strings, width: usize) -> Vec<Line<'static>> {
    let width = width.max(20);
    let mut lines = Vec::new();

    for chunk in textwrap::wrap(&page.title, width) {
        lines.push(Line::from(Span::styled(
            chunk.into_owned(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
    }

    let mut byline = vec![Span::styled(
        page.author_name.clone(),
        Style::default().fg(Color::Yellow),
    )];
    if let Some(date) = &page.published_label {
        byline.push(Span::styled(
            format!("  {} {}", strings.update_time, date),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines.push(Line::from(byline));
    lines.push(Line::default());

    if let Some(cover) = &page.cover_url {
        lines.push(Line::from(Span::styled(
            format!("🖼  {cover}"),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if let Some(video) = &page.video {
        lines.push(Line::from(Span::styled(
            format!("▶  {}  (v to open)", video.embed_url),
            Style::default().fg(Color::Red),
        )));
    }

    if let Some(excerpt) = &page.excerpt {
        lines.push(Line::default());
        for chunk in textwrap::wrap(excerpt, width.saturating_sub(2).max(10)) {
            lines.push(Line::from(vec![
                Span::styled("│ ", Style::default().fg(Color::Blue)),
                Span::styled(
                    chunk.into_owned(),
                    Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
                ),
            ]));
        }
    }
    lines.push(Line::default());

    match html2text::from_read(page.body_html.as_bytes(), width) {
        Ok(text) => lines.extend(text.lines().map(|l| Line::from(l.to_string()))),
        Err(e) => {
            tracing::debug!("Failed to convert article body to text: {}", e);
        }
    }

    if !page.tags.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            page.tags
                .iter()
                .map(|t| format!("#{t}"))
                .collect::<Vec<_>>()
                .join(" "),
            Style::default().fg(Color::Cyan),
        )));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        strings.share,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(format!("  Facebook  {}", page.share.facebook)));
    lines.push(Line::from(format!("  WhatsApp  {}", page.share.whatsapp)));

    if !page.related.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", strings.related_strong),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(strings.related_rest),
            Span::styled(
                format!("  /{}/category/{}", page.lang, page.category_slug),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        for item in &page.related {
            let mut spans = vec![Span::raw(format!("  • {}", item.title))];
            if let Some(date) = &item.date_label {
                spans.push(Span::styled(
                    format!("  {date}"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            lines.push(Line::from(spans));
        }
    }

    lines
}

fn render_article(frame: &mut Frame, app: &App, page: &ArticleViewModel, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner_width = block.inner(area).width as usize;

    let lines = article_lines(page, app.strings(), inner_width);
    let max_scroll = lines.len().saturating_sub(1) as u16;

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll.min(max_scroll), 0));

    frame.render_widget(paragraph, area);
}

fn render_not_found(frame: &mut Frame, app: &App, area: Rect) {
    let strings = app.strings();
    let text = vec![
        Line::default(),
        Line::from(Span::styled(
            format!("404 - {}", strings.not_found),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            strings.not_found_desc,
            Style::default().fg(Color::DarkGray),
        )),
        Line::default(),
        Line::from(Span::styled(
            format!("[ {} ]", strings.go_home),
            Style::default().fg(Color::Blue),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new("Loading article...")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let view = match app.view_state() {
        Some(DwellState::Pending { .. }) => "👁 reading  ",
        Some(DwellState::Fired) => "👁 counted  ",
        Some(DwellState::Idle) | None => "",
    };
    let text = format!("{view}j/k:scroll  Tab:tabs  Enter:open  ⌫:back  l:lang  ?:help  q:quit");

    let paragraph = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

fn render_sidebar(frame: &mut Frame, app: &App, page: &ArticleViewModel, area: Rect) {
    let ad_height = if page.ad_banner.is_some() { 4 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),         // Social counters
            Constraint::Length(ad_height), // Advertisement
            Constraint::Min(0),            // Most viewed / popular
            Constraint::Length(8),         // Trending topics
        ])
        .split(area);

    render_social(frame, app, page, chunks[0]);
    if page.ad_banner.is_some() {
        render_ad(frame, page, chunks[1]);
    }
    render_tabs(frame, app, chunks[2]);
    render_trending(frame, app, page, chunks[3]);
}

fn render_social(frame: &mut Frame, app: &App, page: &ArticleViewModel, area: Rect) {
    let strings = app.strings();
    let social = &page.social;
    let rows = [
        ("f", Color::Blue, &social.facebook, strings.fans),
        ("t", Color::Cyan, &social.twitter, strings.followers),
        ("▶", Color::Red, &social.youtube, strings.subscribers),
    ];

    let lines: Vec<Line> = rows
        .into_iter()
        .map(|(icon, color, counter, label)| {
            Line::from(vec![
                Span::styled(format!(" {icon} "), Style::default().fg(color)),
                Span::styled(
                    counter.display.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" {label}")),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_ad(frame: &mut Frame, page: &ArticleViewModel, area: Rect) {
    let Some(banner) = &page.ad_banner else {
        return;
    };

    let paragraph = Paragraph::new(vec![
        Line::from(Span::styled(
            banner.image_url.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(banner.link.clone(), Style::default().fg(Color::Blue))),
    ])
    .block(
        Block::default()
            .title(" Advertisement ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(paragraph, area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let strings = app.strings();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let selected = match app.sidebar_tab {
        SidebarTab::MostViewed => 0,
        SidebarTab::Popular => 1,
        SidebarTab::Related => 2,
    };
    let tabs = Tabs::new(vec![
        SidebarTab::MostViewed.label(strings),
        SidebarTab::Popular.label(strings),
        SidebarTab::Related.label(strings),
    ])
    .select(selected)
    .highlight_style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(tabs, chunks[0]);

    let items = app.sidebar_items();
    if items.is_empty() {
        let paragraph = Paragraph::new(strings.not_found)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, chunks[1]);
        return;
    }

    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let mut lines = vec![Line::from(Span::styled(
                item.title.clone(),
                Style::default().fg(Color::White),
            ))];
            if let Some(date) = &item.date_label {
                lines.push(Line::from(Span::styled(
                    format!("  {date}"),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(list_items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.sidebar_index));

    frame.render_stateful_widget(list, chunks[1], &mut state);
}

fn render_trending(frame: &mut Frame, app: &App, page: &ArticleViewModel, area: Rect) {
    let strings = app.strings();
    let mut lines: Vec<Line> = page
        .trending
        .iter()
        .filter_map(|c| c.name.as_deref())
        .map(|name| Line::from(format!(" • {name}")))
        .collect();
    lines.push(Line::from(Span::styled(
        format!(" {} →", strings.view_all),
        Style::default().fg(Color::Blue),
    )));

    let title = format!(" {} {} ", strings.trending_strong, strings.trending_rest);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)),
    );
    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(50, 60, frame.area());

    let help_text = vec![
        "",
        " Reading:",
        "   j / k        Scroll article",
        "   Tab          Switch Most Viewed / Popular / Related",
        "   J / K ↑ ↓    Move in sidebar",
        "   Enter        Open sidebar article",
        "   Backspace    Back",
        "",
        " Actions:",
        "   l            Switch language",
        "   r            Reload",
        "   o            Open in browser",
        "   v            Open video",
        "",
        " General:",
        "   ?            Toggle this help",
        "   q            Quit",
        "",
        " Press any key to close",
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text.join("\n"))
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(ratatui::widgets::Clear, area);
    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use crate::models::{PageMeta, ShareLinks, SidebarItem, SocialCounter, SocialStats};

    fn counter() -> SocialCounter {
        SocialCounter {
            count: 0,
            display: "0".to_string(),
            url: "#".to_string(),
        }
    }

    fn page() -> ArticleViewModel {
        ArticleViewModel {
            slug: "budget-2025".to_string(),
            lang: "en".to_string(),
            locale: Locale::En,
            meta: PageMeta {
                title: "Budget 2025 Unveiled".to_string(),
                description: None,
                images: Vec::new(),
            },
            view_key: Some("doc-1".to_string()),
            view_count: 0,
            title: "Budget 2025 Unveiled".to_string(),
            breadcrumb: "Budget 2025 Unveiled...".to_string(),
            body_html: "<p>Spending rises.</p>".to_string(),
            excerpt: Some("Short version".to_string()),
            cover_url: None,
            published_at: None,
            published_label: Some("June 1, 2025".to_string()),
            category_name: "Economy".to_string(),
            category_slug: "economy".to_string(),
            author_name: "Editor".to_string(),
            tags: vec!["finance".to_string()],
            video: None,
            share: ShareLinks {
                facebook: "fb".to_string(),
                whatsapp: "wa".to_string(),
            },
            related: vec![SidebarItem {
                slug: "tax-cuts".to_string(),
                title: "Tax cuts".to_string(),
                thumbnail_url: None,
                date_label: None,
            }],
            most_viewed: Vec::new(),
            popular: Vec::new(),
            settings: None,
            trending: Vec::new(),
            ad_banner: None,
            social: SocialStats {
                facebook: counter(),
                twitter: counter(),
                youtube: counter(),
            },
        }
    }

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn article_lines_include_body_and_tags() {
        let text = plain(&article_lines(&page(), Strings::for_lang("en"), 60));

        assert_eq!(text[0], "Budget 2025 Unveiled");
        assert!(text[1].contains("Updated: June 1, 2025"));
        assert!(text.iter().any(|l| l.contains("Spending rises.")));
        assert!(text.iter().any(|l| l == "#finance"));
        assert!(text.iter().any(|l| l == "Share:"));
        assert!(text
            .iter()
            .any(|l| l == "Related News  /en/category/economy"));
        assert!(text.iter().any(|l| l == "  • Tax cuts"));
    }
}
