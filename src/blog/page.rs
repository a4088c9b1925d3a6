use axum::{debug_handler, extract::Path, response::Html};

use crate::{AppError, AppResult, include_res};

use super::posts::{self, BlogPost};

#[debug_handler]
pub(crate) async fn index() -> Html<String> {
    let items: String = posts::POSTS.iter().map(post_item).collect();

    Html(include_res!(str, "/pages/blog/index.html").replace("{posts}", &items))
}

#[debug_handler]
pub(crate) async fn post(Path(slug): Path<String>) -> AppResult<Html<String>> {
    let post = posts::post_by_slug(&slug).ok_or(AppError::NotFound)?;

    let mut content_html = String::new();
    pulldown_cmark::html::push_html(&mut content_html, pulldown_cmark::Parser::new(post.content));

    let body = include_res!(str, "/pages/blog/post.html")
        .replace("{title}", post.title)
        .replace("{author}", post.author)
        .replace("{published_at}", post.published_at)
        .replace("{reading_time}", &post.reading_time_mins.to_string())
        .replace("{tags}", &post.tags.join(", "))
        .replace("{content}", &content_html);

    Ok(Html(body))
}

fn post_item(post: &BlogPost) -> String {
    include_res!(str, "/pages/blog/post_item.html")
        .replace("{slug}", post.slug)
        .replace("{title}", post.title)
        .replace("{excerpt}", post.excerpt)
        .replace("{published_at}", post.published_at)
        .replace("{reading_time}", &post.reading_time_mins.to_string())
}
