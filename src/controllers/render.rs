use crate::domain::story::Story;
use crate::domain::user::User;
use crate::error::AppResult;

pub const ALL_STORIES_LIST_ID: &str = "all-stories-list";
pub const FAVORITE_STORIES_LIST_ID: &str = "favorited-stories";
pub const OWN_STORIES_LIST_ID: &str = "my-stories";

pub const NO_FAVORITES_MESSAGE: &str = "No favorites added!";
pub const NO_OWN_STORIES_MESSAGE: &str = "No stories added by user yet!";

/// Markup for one story.
///
/// `favorite` is `None` for anonymous visitors; otherwise a star is rendered,
/// filled when the story is a favorite.
pub fn story_markup(story: &Story, favorite: Option<bool>) -> AppResult<String> {
    let host_name = story.host_name()?;

    let star = match favorite {
        Some(true) => "\n  <span class=\"star\"><i class=\"fas fa-star\"></i></span>",
        Some(false) => "\n  <span class=\"star\"><i class=\"far fa-star\"></i></span>",
        None => "",
    };

    Ok(format!(
        "<li id=\"{id}\">{star}\n  <a href=\"{url}\" target=\"a_blank\" class=\"story-link\">{title}</a>\n  <small class=\"story-hostname\">({host})</small>\n  <small class=\"story-author\">by {author}</small>\n  <small class=\"story-user\">posted by {username}</small>\n</li>",
        id = escape_html(&story.story_id),
        star = star,
        url = escape_html(&story.url),
        title = escape_html(&story.title),
        host = escape_html(&host_name),
        author = escape_html(&story.author),
        username = escape_html(&story.username),
    ))
}

/// Markup for a whole list container. Stars follow `user`'s favorites.
pub fn story_list_markup<'a, I>(
    list_id: &str,
    stories: I,
    user: Option<&User>,
    empty_message: Option<&str>,
) -> AppResult<String>
where
    I: IntoIterator<Item = &'a Story>,
{
    let mut items = Vec::new();
    for story in stories {
        let favorite = user.map(|u| u.is_favorite(&story.story_id));
        items.push(story_markup(story, favorite)?);
    }

    if items.is_empty() {
        if let Some(message) = empty_message {
            items.push(format!("<h5>{}</h5>", escape_html(message)));
        }
    }

    let mut markup = format!("<ol id=\"{}\">\n", escape_html(list_id));
    for item in items {
        markup.push_str(&item);
        markup.push('\n');
    }
    markup.push_str("</ol>");

    Ok(markup)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
