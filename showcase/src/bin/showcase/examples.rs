use crate::commands::{catalog, feed, sitemap};

#[derive(Clone, Copy)]
pub struct ExampleGroup {
    pub title: &'static str,
    pub commands: &'static [&'static str],
}

#[derive(Clone, Copy)]
pub struct CommandExample {
    pub name: &'static str,
    pub groups: &'static [ExampleGroup],
}

pub fn command_examples() -> &'static [CommandExample] {
    &[
        CommandExample {
            name: "feed",
            groups: feed::EXAMPLES,
        },
        CommandExample {
            name: "products",
            groups: catalog::PRODUCT_EXAMPLES,
        },
        CommandExample {
            name: "categories",
            groups: catalog::CATEGORY_EXAMPLES,
        },
        CommandExample {
            name: "sitemap",
            groups: sitemap::EXAMPLES,
        },
    ]
}
