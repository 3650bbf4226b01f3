//! URLs handed to the table, editor and creator templates.

use super::DASHBOARD_PAGES_PREFIX;

/// Links a view needs for one resource collection.
pub trait UrlBuilder {
    /// Full-page collection path; target of create forms and post-create redirects.
    fn collection_url(&self) -> String;

    /// Fragment URL that re-renders the table.
    fn list_url(&self) -> String;

    /// Fragment URL of the creator form.
    fn new_url(&self) -> String;

    /// Fragment URL of one entity; used for editor loads, updates and archives.
    fn individual_url(&self, id: u64) -> String;

    /// Address-bar URL pushed when an entity is opened.
    fn push_url(&self, id: u64) -> String;
}

/// URL builder rooted at a concrete collection path such as `/recipes/4/recipe_steps`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceUrls {
    collection: String,
}

impl ResourceUrls {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
        }
    }
}

impl UrlBuilder for ResourceUrls {
    fn collection_url(&self) -> String {
        self.collection.clone()
    }

    fn list_url(&self) -> String {
        format!("{DASHBOARD_PAGES_PREFIX}{}", self.collection)
    }

    fn new_url(&self) -> String {
        format!("{DASHBOARD_PAGES_PREFIX}{}/new", self.collection)
    }

    fn individual_url(&self, id: u64) -> String {
        format!("{DASHBOARD_PAGES_PREFIX}{}/{id}", self.collection)
    }

    fn push_url(&self, id: u64) -> String {
        format!("{}/{id}", self.collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_collection_urls() {
        let urls = ResourceUrls::new("/recipes/4/recipe_steps");
        assert_eq!(urls.list_url(), "/dashboard_pages/recipes/4/recipe_steps");
        assert_eq!(urls.new_url(), "/dashboard_pages/recipes/4/recipe_steps/new");
        assert_eq!(urls.individual_url(9), "/dashboard_pages/recipes/4/recipe_steps/9");
        assert_eq!(urls.push_url(9), "/recipes/4/recipe_steps/9");
        assert_eq!(urls.collection_url(), "/recipes/4/recipe_steps");
    }
}
