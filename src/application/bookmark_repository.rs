// src/application/bookmark_repository.rs
use tracing::{debug, info, instrument, warn};

use crate::application::migrator::{MigrationOutcome, SchemaMigrator};
use crate::application::transfer::{self, ImportSummary};
use crate::application::KeyValueStore;
use crate::constants::{EMPTY_STORE_JSON, QUICK_CARD_TITLE, STORAGE_KEY};
use crate::domain::link::validate_url;
use crate::domain::{host_from, CardPatch, DomainError, Group, Link, LinkPatch, Store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepositoryOptions {
    /// Extend a card's tags with the comma separated note of every link
    /// added or edited in it.
    pub derive_tags_from_notes: bool,
}

impl Default for RepositoryOptions {
    fn default() -> Self {
        Self {
            derive_tags_from_notes: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddLinkOutcome {
    Added { link: Link, group: Group },
    /// The card already holds this exact url; nothing changed.
    Duplicate,
}

impl AddLinkOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, AddLinkOutcome::Added { .. })
    }
}

/// Owns the in-memory cards and writes the whole store through the
/// persistence port after every successful command.
///
/// Commands run against a copy of the store; the copy replaces the live
/// store only once it has been written, so a failed write leaves memory as
/// it was. Commands addressing a missing card or link return `Ok(None)`.
pub struct BookmarkRepository<S: KeyValueStore> {
    storage: S,
    store: Store,
    options: RepositoryOptions,
}

impl<S: KeyValueStore> BookmarkRepository<S> {
    /// Wrap `storage` with an empty store. Nothing is read.
    pub fn new(storage: S) -> Self {
        Self::with_options(storage, RepositoryOptions::default())
    }

    pub fn with_options(storage: S, options: RepositoryOptions) -> Self {
        Self {
            storage,
            store: Store::default(),
            options,
        }
    }

    /// Run migrations, then load the current schema.
    pub fn open(storage: S) -> Result<Self, DomainError> {
        Self::open_with_options(storage, RepositoryOptions::default())
    }

    pub fn open_with_options(storage: S, options: RepositoryOptions) -> Result<Self, DomainError> {
        let mut repository = Self::with_options(storage, options);
        repository.migrate()?;
        repository.load()?;
        Ok(repository)
    }

    pub fn migrate(&mut self) -> Result<MigrationOutcome, DomainError> {
        SchemaMigrator::new(&mut self.storage).run()
    }

    /// Replace the in-memory store with the persisted one.
    ///
    /// An absent key, a blob without `groups` or a blob that does not parse
    /// all leave the in-memory store untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&mut self) -> Result<(), DomainError> {
        let Some(raw) = self.storage.get(STORAGE_KEY)? else {
            debug!("Nothing persisted yet");
            return Ok(());
        };

        match Store::parse(&raw) {
            Ok(Some(store)) => {
                debug!(groups = store.groups.len(), "Loaded bookmarks");
                self.store = store;
            }
            Ok(None) => debug!("Persisted blob has no groups, keeping current state"),
            Err(e) => warn!(error = %e, "Failed to load data"),
        }
        Ok(())
    }

    pub fn save(&mut self) -> Result<(), DomainError> {
        let json = self.store.to_json()?;
        self.storage.set(STORAGE_KEY, &json)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn group(&self, group_id: &str) -> Option<&Group> {
        self.store.groups.get(group_id)
    }

    /// Cards ordered by title, case-insensitively.
    pub fn groups(&self) -> Vec<&Group> {
        let mut groups: Vec<&Group> = self.store.groups.values().collect();
        groups.sort_by_key(|g| g.display_key());
        groups
    }

    pub fn link_count(&self) -> usize {
        self.store.link_count()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn create_group(&mut self, title: &str, desc: &str) -> Result<Group, DomainError> {
        let group = Group::new(title, desc);
        let created = group.clone();
        self.commit(|store| {
            store.groups.insert(group.id.clone(), group);
            Ok(())
        })?;
        info!(group_id = %created.id, title = %created.title, "Created card");
        Ok(created)
    }

    /// Prepend a link to a card.
    ///
    /// Fails with `InvalidDestination` when the card does not exist and with
    /// `InvalidUrl` when `url` does not parse.
    #[instrument(level = "debug", skip(self))]
    pub fn add_link(
        &mut self,
        group_id: &str,
        url: &str,
        title: &str,
        note: &str,
    ) -> Result<AddLinkOutcome, DomainError> {
        if !self.store.groups.contains_key(group_id) {
            return Err(DomainError::InvalidDestination(group_id.to_string()));
        }
        validate_url(url)?;

        let derive = self.options.derive_tags_from_notes;
        let added = self.commit_if(|store| {
            let Some(group) = store.groups.get_mut(group_id) else {
                return Ok(None);
            };
            if group.contains_url(url) {
                return Ok(None);
            }
            let link = Link::new(url, title, note);
            group.links.insert(0, link.clone());
            if derive {
                group.absorb_note_tags(note);
            }
            Ok(Some((link, group.clone())))
        })?;

        match added {
            Some((link, group)) => {
                info!(group_id, link_id = %link.id, "Added link");
                Ok(AddLinkOutcome::Added { link, group })
            }
            None => {
                debug!(group_id, url, "Duplicate url, not added");
                Ok(AddLinkOutcome::Duplicate)
            }
        }
    }

    /// Add a link without a chosen card: a new card named after the url's
    /// host is created to hold it.
    pub fn add_link_to_new_card(
        &mut self,
        url: &str,
        title: &str,
        note: &str,
    ) -> Result<AddLinkOutcome, DomainError> {
        validate_url(url)?;
        let host = host_from(url);
        let card_title = if host.is_empty() { QUICK_CARD_TITLE } else { host.as_str() };
        let group = self.create_group(card_title, "")?;
        self.add_link(&group.id, url, title, note)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn remove_link(&mut self, group_id: &str, link_id: &str) -> Result<Option<Link>, DomainError> {
        self.commit_if(|store| {
            let Some(group) = store.groups.get_mut(group_id) else {
                return Ok(None);
            };
            let Some(idx) = group.links.iter().position(|l| l.id == link_id) else {
                return Ok(None);
            };
            Ok(Some(group.links.remove(idx)))
        })
    }

    /// Patch a link. A patched url is validated and its host recomputed; a
    /// patched non-empty note extends the card's tags, which never shrink.
    ///
    /// A url already held by another link of the card fails with
    /// `DuplicateUrl` and leaves the card untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn update_link(
        &mut self,
        group_id: &str,
        link_id: &str,
        patch: &LinkPatch,
    ) -> Result<Option<Link>, DomainError> {
        if let Some(url) = &patch.url {
            validate_url(url)?;
        }

        let derive = self.options.derive_tags_from_notes;
        self.commit_if(|store| {
            let Some(group) = store.groups.get_mut(group_id) else {
                return Ok(None);
            };
            if !group.links.iter().any(|l| l.id == link_id) {
                return Ok(None);
            }
            if let Some(url) = &patch.url {
                if group.links.iter().any(|l| l.id != link_id && l.url == *url) {
                    return Err(DomainError::DuplicateUrl(url.clone()));
                }
            }
            let Some(link) = group.find_link_mut(link_id) else {
                return Ok(None);
            };
            link.apply(patch);
            let updated = link.clone();
            if derive {
                if let Some(note) = &patch.note {
                    group.absorb_note_tags(note);
                }
            }
            Ok(Some(updated))
        })
    }

    /// Merge title and description into a card. A blank title is rejected.
    #[instrument(level = "debug", skip(self))]
    pub fn update_card(&mut self, group_id: &str, patch: &CardPatch) -> Result<Option<Group>, DomainError> {
        if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(DomainError::EmptyTitle);
        }

        self.commit_if(|store| {
            let Some(group) = store.groups.get_mut(group_id) else {
                return Ok(None);
            };
            group.apply(patch);
            Ok(Some(group.clone()))
        })
    }

    /// Remove a card together with all of its links.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_group(&mut self, group_id: &str) -> Result<Option<Group>, DomainError> {
        let removed = self.commit_if(|store| Ok(store.groups.remove(group_id)))?;
        if let Some(group) = &removed {
            info!(group_id, links = group.links.len(), "Deleted card");
        }
        Ok(removed)
    }

    /// Returns the number of tags that were new to the card.
    pub fn add_tags(&mut self, group_id: &str, tags: &[String]) -> Result<Option<usize>, DomainError> {
        self.commit_if(|store| Ok(store.groups.get_mut(group_id).map(|g| g.add_tags(tags))))
    }

    /// Returns whether the tag was present.
    pub fn remove_tag(&mut self, group_id: &str, tag: &str) -> Result<Option<bool>, DomainError> {
        self.commit_if(|store| Ok(store.groups.get_mut(group_id).map(|g| g.remove_tag(tag))))
    }

    /// Drop every card and the persisted blob. Legacy keys are kept.
    pub fn clear_all(&mut self) -> Result<(), DomainError> {
        self.storage.remove(STORAGE_KEY)?;
        self.store = Store::default();
        info!("Cleared all cards");
        Ok(())
    }

    /// The persisted blob as it is stored, or an empty document.
    pub fn export_json(&self) -> Result<String, DomainError> {
        Ok(self
            .storage
            .get(STORAGE_KEY)?
            .unwrap_or_else(|| EMPTY_STORE_JSON.to_string()))
    }

    /// Merge a backup document without overwriting or removing anything.
    #[instrument(level = "debug", skip(self, raw))]
    pub fn import_json(&mut self, raw: &str) -> Result<ImportSummary, DomainError> {
        let document = transfer::parse_backup(raw)?;
        let summary = self.commit(|store| Ok(transfer::merge(store, document)))?;
        info!(?summary, "Imported backup");
        Ok(summary)
    }

    fn commit<T>(
        &mut self,
        apply: impl FnOnce(&mut Store) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let mut draft = self.store.clone();
        let out = apply(&mut draft)?;
        self.storage.set(STORAGE_KEY, &draft.to_json()?)?;
        self.store = draft;
        Ok(out)
    }

    /// Like `commit`, but `None` means nothing changed and nothing is written.
    fn commit_if<T>(
        &mut self,
        apply: impl FnOnce(&mut Store) -> Result<Option<T>, DomainError>,
    ) -> Result<Option<T>, DomainError> {
        let mut draft = self.store.clone();
        let Some(out) = apply(&mut draft)? else {
            return Ok(None);
        };
        self.storage.set(STORAGE_KEY, &draft.to_json()?)?;
        self.store = draft;
        Ok(Some(out))
    }
}
