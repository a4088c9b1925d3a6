use crate::include_res;

/// Static post registry, newest first. Bodies are markdown embedded from
/// res/blog/ and rendered at request time.
pub struct BlogPost {
    pub slug: &'static str,
    pub title: &'static str,
    pub excerpt: &'static str,
    pub author: &'static str,
    pub published_at: &'static str,
    pub tags: &'static [&'static str],
    pub reading_time_mins: u32,
    pub content: &'static str,
}

pub const POSTS: &[BlogPost] = &[
    BlogPost {
        slug: "build-your-first-collection",
        title: "Build Your First Collection",
        excerpt: "Save the servers and skills you actually use into a shareable list your whole team can pick up.",
        author: "MCPSkills Team",
        published_at: "2025-07-02",
        tags: &["collections", "getting-started"],
        reading_time_mins: 4,
        content: include_res!(str, "/blog/build-your-first-collection.md"),
    },
    BlogPost {
        slug: "what-are-openclaw-skills",
        title: "What Are OpenClaw Skills?",
        excerpt: "Skills extend Claude with specialised workflow knowledge. Here's how they differ from MCP servers.",
        author: "MCPSkills Team",
        published_at: "2025-06-24",
        tags: &["skills", "explainer"],
        reading_time_mins: 5,
        content: include_res!(str, "/blog/what-are-openclaw-skills.md"),
    },
    BlogPost {
        slug: "what-is-mcp",
        title: "What is MCP? The Model Context Protocol Explained",
        excerpt: "MCP is the standard that lets AI assistants connect to any tool or data source. Everything you need to know.",
        author: "MCPSkills Team",
        published_at: "2025-06-15",
        tags: &["mcp", "explainer", "getting-started"],
        reading_time_mins: 6,
        content: include_res!(str, "/blog/what-is-mcp.md"),
    },
];

pub fn post_by_slug(slug: &str) -> Option<&'static BlogPost> {
    POSTS.iter().find(|p| p.slug == slug)
}
