use ego_tree::NodeRef;
use scraper::{ElementRef, Node};

/// Finds the content block labelled by a named comment marker.
///
/// The target site marks its semantic regions with HTML comments instead
/// of stable ids or classes. The block of interest is the first child
/// element of the element immediately following the first comment whose
/// text contains `marker`. A missing marker, a marker with no following
/// sibling element, or a sibling with no child element all mean the
/// region is absent from this page, not that anything failed.
pub fn locate<'a>(marker: &str, root: NodeRef<'a, Node>) -> Option<ElementRef<'a>> {
    let comment = root.descendants().find(|node| {
        node.value()
            .as_comment()
            .is_some_and(|text| text.contains(marker))
    })?;

    let sibling = comment.next_siblings().find_map(ElementRef::wrap)?;
    sibling.children().find_map(ElementRef::wrap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn returns_first_child_element_of_the_following_block() {
        let html = Html::parse_document(
            r#"<body><!-- Main Content --><div><div id="inner">hello</div></div></body>"#,
        );
        let block = locate("Main Content", html.tree.root()).expect("block should be found");
        assert_eq!(block.value().attr("id"), Some("inner"));
    }

    #[test]
    fn matches_marker_as_substring_of_comment_text() {
        let html = Html::parse_document(
            r#"<body><!--   begin Main Content region   --><div><span>x</span></div></body>"#,
        );
        assert!(locate("Main Content", html.tree.root()).is_some());
    }

    #[test]
    fn skips_text_nodes_between_comment_and_block() {
        let html = Html::parse_document(
            "<body><!-- Main Content -->\n   \n<div><p>addr</p></div></body>",
        );
        let block = locate("Main Content", html.tree.root()).expect("block should be found");
        assert_eq!(block.value().name(), "p");
    }

    #[test]
    fn absent_when_no_comment_matches() {
        let html =
            Html::parse_document(r#"<body><!-- Sidebar --><div><div></div></div></body>"#);
        assert!(locate("Main Content", html.tree.root()).is_none());
    }

    #[test]
    fn absent_when_comment_is_the_last_node() {
        let html = Html::parse_document(r#"<body><div></div><!-- Main Content --></body>"#);
        assert!(locate("Main Content", html.tree.root()).is_none());
    }

    #[test]
    fn absent_when_sibling_has_no_child_element() {
        let html =
            Html::parse_document(r#"<body><!-- Main Content --><div>plain text</div></body>"#);
        assert!(locate("Main Content", html.tree.root()).is_none());
    }
}
