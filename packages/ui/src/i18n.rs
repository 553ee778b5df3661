use dioxus::prelude::*;

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    En,
    Fr,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Fr => "fr",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.to_ascii_lowercase();
        match code.split(['-', '_']).next().unwrap_or_default() {
            "en" => Some(Lang::En),
            "fr" => Some(Lang::Fr),
            _ => None,
        }
    }
}

/// Provide `Signal<Lang>` to the component tree, defaulting to English.
#[component]
pub fn I18nProvider(children: Element) -> Element {
    let mut lang = use_signal(|| Lang::En);
    use_context_provider(|| lang);

    // Best-effort: saved choice, then the webview's language.
    use_effect(move || {
        spawn(async move {
            let js = r#"
            (function(){
              try {
                const saved = localStorage.getItem("app_lang");
                if(saved && typeof saved === "string" && saved.length > 0) return saved;
              } catch(e) {}
              try { return (navigator.language || "en"); } catch(e) {}
              return "en";
            })()
            "#;
            if let Ok(v) = document::eval(js).await {
                if let Some(next) = v.as_str().and_then(Lang::from_code) {
                    lang.set(next);
                }
            }
        });
    });

    rsx! { {children} }
}

pub fn use_lang() -> Signal<Lang> {
    if let Some(sig) = try_use_context::<Signal<Lang>>() {
        return sig;
    }

    tracing::warn!("missing I18nProvider context, using a local Lang::En signal");
    use_signal(|| Lang::En)
}

pub fn set_lang(mut signal: Signal<Lang>, lang: Lang) {
    signal.set(lang);
    spawn(async move {
        let _ = document::eval(&format!(
            r#"(function(){{ try {{ localStorage.setItem("app_lang","{}"); }} catch(e) {{}} return ""; }})()"#,
            lang.code()
        ))
        .await;
    });
}

/// Translate a key. Missing French strings fall back to English, then to the key.
pub fn t(lang: Lang, key: &str) -> String {
    match (lang, key) {
        // Nav / common
        (_, "app.name") => "Clipstage".to_string(),
        (Lang::En, "nav.feed") => "Feed".to_string(),
        (Lang::Fr, "nav.feed") => "Fil".to_string(),
        (Lang::En, "nav.upload") => "Upload".to_string(),
        (Lang::Fr, "nav.upload") => "Publier".to_string(),
        (Lang::En, "nav.dashboard") => "Dashboard".to_string(),
        (Lang::Fr, "nav.dashboard") => "Tableau de bord".to_string(),
        (Lang::En, "lang.toggle") => "FR".to_string(),
        (Lang::Fr, "lang.toggle") => "EN".to_string(),
        (Lang::En, "common.loading") => "Loading…".to_string(),
        (Lang::Fr, "common.loading") => "Chargement…".to_string(),
        (Lang::En, "common.retry") => "Try again".to_string(),
        (Lang::Fr, "common.retry") => "Réessayer".to_string(),
        (Lang::En, "common.back") => "Back".to_string(),
        (Lang::Fr, "common.back") => "Retour".to_string(),
        (Lang::En, "common.signin_required") => "Sign in to continue.".to_string(),
        (Lang::Fr, "common.signin_required") => "Connectez-vous pour continuer.".to_string(),

        // Feed
        (Lang::En, "feed.title") => "Discover".to_string(),
        (Lang::Fr, "feed.title") => "Découvrir".to_string(),
        (Lang::En, "feed.empty") => "No content available".to_string(),
        (Lang::Fr, "feed.empty") => "Aucun contenu disponible".to_string(),
        (Lang::En, "feed.refresh") => "Refresh".to_string(),
        (Lang::Fr, "feed.refresh") => "Actualiser".to_string(),
        (Lang::En, "feed.search_ph") => "Search titles and descriptions".to_string(),
        (Lang::Fr, "feed.search_ph") => "Rechercher titres et descriptions".to_string(),
        (Lang::En, "feed.tag_ph") => "Filter by tags (comma-separated)".to_string(),
        (Lang::Fr, "feed.tag_ph") => "Filtrer par tags (séparés par des virgules)".to_string(),
        (Lang::En, "feed.search") => "Search".to_string(),
        (Lang::Fr, "feed.search") => "Rechercher".to_string(),
        (Lang::En, "feed.results") => "results".to_string(),
        (Lang::Fr, "feed.results") => "résultats".to_string(),

        // Player
        (Lang::En, "player.no_source") => "This item has no playable media yet.".to_string(),
        (Lang::Fr, "player.no_source") => "Aucun média lisible pour le moment.".to_string(),
        (Lang::En, "player.not_found") => "Content not found".to_string(),
        (Lang::Fr, "player.not_found") => "Contenu introuvable".to_string(),

        // Tips
        (Lang::En, "tip.button") => "Tip creator".to_string(),
        (Lang::Fr, "tip.button") => "Soutenir".to_string(),
        (Lang::En, "tip.title") => "Send a tip".to_string(),
        (Lang::Fr, "tip.title") => "Envoyer un pourboire".to_string(),
        (Lang::En, "tip.custom_ph") => "Custom amount".to_string(),
        (Lang::Fr, "tip.custom_ph") => "Montant libre".to_string(),
        (Lang::En, "tip.send") => "Tip".to_string(),
        (Lang::Fr, "tip.send") => "Envoyer".to_string(),
        (Lang::En, "tip.cancel") => "Cancel".to_string(),
        (Lang::Fr, "tip.cancel") => "Annuler".to_string(),
        (Lang::En, "tip.redirecting") => "Opening checkout…".to_string(),
        (Lang::Fr, "tip.redirecting") => "Ouverture du paiement…".to_string(),
        (Lang::En, "tip.success") => "Thank you for your tip!".to_string(),
        (Lang::Fr, "tip.success") => "Merci pour votre soutien !".to_string(),
        (Lang::En, "tip.cancelled") => "Tip cancelled".to_string(),
        (Lang::Fr, "tip.cancelled") => "Pourboire annulé".to_string(),

        // Comments
        (Lang::En, "comments.title") => "Comments".to_string(),
        (Lang::Fr, "comments.title") => "Commentaires".to_string(),
        (Lang::En, "comments.placeholder") => "Add a comment…".to_string(),
        (Lang::Fr, "comments.placeholder") => "Ajouter un commentaire…".to_string(),
        (Lang::En, "comments.post") => "Post".to_string(),
        (Lang::Fr, "comments.post") => "Publier".to_string(),
        (Lang::En, "comments.empty") => "No comments yet.".to_string(),
        (Lang::Fr, "comments.empty") => "Aucun commentaire pour le moment.".to_string(),
        (Lang::En, "comments.signin") => "Sign in to comment.".to_string(),
        (Lang::Fr, "comments.signin") => "Connectez-vous pour commenter.".to_string(),

        // Upload
        (Lang::En, "upload.title") => "Upload content".to_string(),
        (Lang::Fr, "upload.title") => "Publier un contenu".to_string(),
        (Lang::En, "upload.file") => "Video or audio file".to_string(),
        (Lang::Fr, "upload.file") => "Fichier vidéo ou audio".to_string(),
        (Lang::En, "upload.form.title") => "Title".to_string(),
        (Lang::Fr, "upload.form.title") => "Titre".to_string(),
        (Lang::En, "upload.form.description") => "Description".to_string(),
        (Lang::Fr, "upload.form.description") => "Description".to_string(),
        (Lang::En, "upload.form.tags") => "Tags (comma-separated)".to_string(),
        (Lang::Fr, "upload.form.tags") => "Tags (séparés par des virgules)".to_string(),
        (Lang::En, "upload.form.visibility") => "Visibility".to_string(),
        (Lang::Fr, "upload.form.visibility") => "Visibilité".to_string(),
        (Lang::En, "upload.submit") => "Upload".to_string(),
        (Lang::Fr, "upload.submit") => "Publier".to_string(),
        (Lang::En, "upload.uploading") => "Uploading…".to_string(),
        (Lang::Fr, "upload.uploading") => "Envoi…".to_string(),
        (Lang::En, "upload.done") => "Content uploaded successfully!".to_string(),
        (Lang::Fr, "upload.done") => "Contenu publié !".to_string(),
        (Lang::En, "upload.failed") => "Upload failed".to_string(),
        (Lang::Fr, "upload.failed") => "Échec de l'envoi".to_string(),
        (Lang::En, "visibility.public") => "Public".to_string(),
        (Lang::Fr, "visibility.public") => "Public".to_string(),
        (Lang::En, "visibility.unlisted") => "Unlisted".to_string(),
        (Lang::Fr, "visibility.unlisted") => "Non répertorié".to_string(),
        (Lang::En, "visibility.private") => "Private".to_string(),
        (Lang::Fr, "visibility.private") => "Privé".to_string(),

        // Dashboard
        (Lang::En, "dashboard.title") => "Creator dashboard".to_string(),
        (Lang::Fr, "dashboard.title") => "Tableau de bord créateur".to_string(),
        (Lang::En, "dashboard.views") => "Total views".to_string(),
        (Lang::Fr, "dashboard.views") => "Vues totales".to_string(),
        (Lang::En, "dashboard.watch_time") => "Watch time".to_string(),
        (Lang::Fr, "dashboard.watch_time") => "Temps de visionnage".to_string(),
        (Lang::En, "dashboard.tips") => "Tips received".to_string(),
        (Lang::Fr, "dashboard.tips") => "Pourboires reçus".to_string(),
        (Lang::En, "dashboard.comments") => "Comments".to_string(),
        (Lang::Fr, "dashboard.comments") => "Commentaires".to_string(),
        (Lang::En, "dashboard.content") => "Published items".to_string(),
        (Lang::Fr, "dashboard.content") => "Contenus publiés".to_string(),
        (Lang::En, "dashboard.avg_views") => "Avg views per content".to_string(),
        (Lang::Fr, "dashboard.avg_views") => "Vues moyennes par contenu".to_string(),
        (Lang::En, "dashboard.engagement") => "Engagement rate".to_string(),
        (Lang::Fr, "dashboard.engagement") => "Taux d'engagement".to_string(),
        (Lang::En, "dashboard.avg_tip") => "Avg tip amount".to_string(),
        (Lang::Fr, "dashboard.avg_tip") => "Pourboire moyen".to_string(),

        // Toasts
        (Lang::En, "toast.load_feed") => "Couldn't load the feed".to_string(),
        (Lang::Fr, "toast.load_feed") => "Impossible de charger le fil".to_string(),
        (Lang::En, "toast.load_comments") => "Couldn't load comments".to_string(),
        (Lang::Fr, "toast.load_comments") => "Impossible de charger les commentaires".to_string(),
        (Lang::En, "toast.load_dashboard") => "Couldn't load dashboard".to_string(),
        (Lang::Fr, "toast.load_dashboard") => "Impossible de charger le tableau de bord".to_string(),
        (Lang::En, "toast.error") => "Error".to_string(),
        (Lang::Fr, "toast.error") => "Erreur".to_string(),

        (Lang::Fr, k) => t(Lang::En, k),
        (Lang::En, _) => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_both_languages() {
        assert_eq!(t(Lang::En, "feed.empty"), "No content available");
        assert_eq!(t(Lang::Fr, "nav.upload"), "Publier");
    }

    #[test]
    fn fallback_to_english_then_key() {
        assert_eq!(t(Lang::Fr, "app.name"), t(Lang::En, "app.name"));
        assert_eq!(t(Lang::Fr, "missing.key"), "missing.key");
    }

    #[test]
    fn parses_language_tags() {
        assert_eq!(Lang::from_code("fr-FR"), Some(Lang::Fr));
        assert_eq!(Lang::from_code("en_GB"), Some(Lang::En));
        assert_eq!(Lang::from_code("de"), None);
    }
}
