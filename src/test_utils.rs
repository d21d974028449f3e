#[cfg(test)]
pub mod test_helpers {
    use crate::config::Config;
    use crate::dom::NodeId;
    use crate::page::Page;
    use crate::tooltip::TooltipOptions;

    /// Default-config page holding `markup` in its body
    pub fn test_page(markup: &str) -> Page {
        Page::from_markup(markup, Config::default())
    }

    /// Config without transition durations, so completions run immediately
    pub fn instant_config() -> Config {
        let mut config = Config::default();
        config.transition.durations.clear();
        config
    }

    pub fn element(page: &Page, selector: &str) -> NodeId {
        page.document()
            .query_selector(selector)
            .unwrap()
            .unwrap_or_else(|| panic!("no element matches {selector}"))
    }

    /// Bind a default tooltip to `selector` and return its element
    pub fn bound(page: &mut Page, selector: &str) -> NodeId {
        page.init_tooltip(selector, TooltipOptions::default())
            .unwrap()
            .unwrap_or_else(|| panic!("{selector} was not bound"))
    }

    pub fn event_names(page: &Page) -> Vec<String> {
        page.trace().iter().map(|e| e.event.clone()).collect()
    }

    /// All tooltip nodes currently in the document
    pub fn tooltip_nodes(page: &Page) -> Vec<NodeId> {
        page.document().query_selector_all("[role=tooltip]").unwrap()
    }
}
