mod article;
mod page;

pub use article::{Article, Category, GlobalSettings, Media};
#[cfg(test)]
pub use article::{Author, Tag};
pub use page::{
    AdBanner, ArticleViewModel, FetchOutcome, NotFoundPage, PageMeta, PageOutcome, ShareLinks,
    SidebarItem, SocialCounter, SocialStats, VideoEmbed,
};
