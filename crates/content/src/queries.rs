//! GROQ queries issued against the dataset.

pub const POSTS: &str = r#"*[_type == "post"] | order(publishedAt desc){
  _id,
  title,
  "slug": slug.current,
  excerpt,
  body,
  tags,
  websiteUrl,
  githubUrl,
  publishedAt,
  coverImage
}"#;

pub const POST_SLUGS: &str = r#"*[_type == "post" && defined(slug.current)][]{
  "slug": slug.current
}"#;

pub const PROJECTS: &str = r#"*[_type == "project"] | order(publishedAt desc){
  _id,
  title,
  "slug": slug.current,
  summary,
  problem,
  techStack,
  demoUrl,
  githubUrl,
  featured,
  publishedAt,
  coverImage,
  impact
}"#;

pub const PROJECT_SLUGS: &str = r#"*[_type == "project" && defined(slug.current)][]{
  "slug": slug.current
}"#;

pub const ADMIN_SETTINGS: &str = r#"*[_type == "adminSettings"][0]{
  quickLinks[]{
    _key,
    title,
    description,
    href,
    isExternal,
    category,
    order,
    enabled
  }
}"#;

pub const ADMIN_SETTINGS_ID: &str = r#"*[_type == "adminSettings"][0]{_id}"#;
