use super::filter::{filter_articles, CategorySelector};
use super::paginator::{page_count, paginate};
use super::ViewResponse;
use crate::domain::news::{AggregationResult, Article, ArticleResponse};

/// View state of one client session over one aggregation result.
///
/// The filtered view is recomputed eagerly by every mutator, and any change
/// to the result, the category or the search text puts the session back on
/// page 1, so a page index never outlives the filter it was chosen under.
#[derive(Debug, Clone)]
pub struct ViewSession {
    result: AggregationResult,
    selector: CategorySelector,
    search_text: String,
    current_page: usize,
    page_size: usize,
    filtered: Vec<Article>,
}

impl ViewSession {
    pub fn new(result: AggregationResult, page_size: usize) -> Self {
        let mut session = Self {
            result,
            selector: CategorySelector::All,
            search_text: String::new(),
            current_page: 1,
            page_size: page_size.max(1),
            filtered: Vec::new(),
        };
        session.recompute();
        session
    }

    pub fn set_result(&mut self, result: AggregationResult) {
        if self.result != result {
            self.result = result;
            self.reset();
        }
    }

    pub fn set_selected_category(&mut self, value: &str) {
        let selector = CategorySelector::parse(value);
        if self.selector != selector {
            self.selector = selector;
            self.reset();
        }
    }

    pub fn set_search_text(&mut self, value: &str) {
        if self.search_text != value {
            self.search_text = value.to_string();
            self.reset();
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.page_count());
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_count(&self) -> usize {
        page_count(self.filtered.len(), self.page_size)
    }

    pub fn result(&self) -> &AggregationResult {
        &self.result
    }

    pub fn view(&self) -> ViewResponse {
        let page = paginate(&self.filtered, self.page_size, self.current_page);

        ViewResponse {
            articles: page
                .items
                .iter()
                .cloned()
                .map(ArticleResponse::from)
                .collect(),
            page_count: page.page_count,
            effective_page: page.effective_page,
            page_size: self.page_size,
            total_results: self.filtered.len(),
            selected_category: self.selector.clone(),
            search_text: self.search_text.clone(),
            run_status: self.result.run_status(),
            quota_denial: self.result.quota_denial().map(str::to_string),
            category_status: self.result.per_category_status.clone(),
        }
    }

    fn reset(&mut self) {
        self.current_page = 1;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.filtered = filter_articles(&self.result.articles, &self.selector, &self.search_text);
        self.current_page = self.current_page.clamp(1, self.page_count());
    }
}
