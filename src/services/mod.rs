mod cms;
mod media;
mod source;
mod strapi;

pub use cms::CmsClient;
pub use media::MediaResolver;
pub use source::ContentSource;
