//! Edit session: the current image, its original and the undo history.
//!
//! An [`EditSession`] starts empty and becomes loaded once an image is
//! given to it. Every mutating call either fully succeeds or leaves the
//! session as it was. [`SharedSession`] wraps a session for use from
//! several threads.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::decode::{decode_image, DecodeError};
use crate::encode::encode_jpeg;
use crate::history::History;
use crate::ops::EditOp;
use crate::{EditError, EditorConfig, Image};

#[derive(Debug)]
enum SessionState {
    Empty,
    Loaded {
        original: Arc<Image>,
        current: Arc<Image>,
        history: History,
    },
}

/// A single-image editing session.
#[derive(Debug)]
pub struct EditSession {
    config: EditorConfig,
    state: SessionState,
}

impl Default for EditSession {
    fn default() -> Self {
        Self {
            config: EditorConfig::default(),
            state: SessionState::Empty,
        }
    }
}

impl EditSession {
    /// Create an empty session.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `config` does not validate.
    pub fn new(config: EditorConfig) -> Result<Self, EditError> {
        config.validate()?;
        Ok(Self {
            config,
            state: SessionState::Empty,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, SessionState::Loaded { .. })
    }

    /// Start editing `image`, discarding any previous image and history.
    ///
    /// The image becomes the first history entry and the session's original.
    ///
    /// # Errors
    ///
    /// `Decode(EmptyImage)` for an image with a zero dimension and
    /// `InvalidImage` for a buffer that does not match its dimensions. The
    /// session is unchanged in both cases.
    pub fn load(&mut self, image: Image) -> Result<Arc<Image>, EditError> {
        if image.is_empty() {
            return Err(DecodeError::EmptyImage.into());
        }
        image.validate()?;
        let image = Arc::new(image);
        let mut history = History::new(self.config.max_history);
        history.push(Arc::clone(&image));
        debug!(width = image.width, height = image.height, "image loaded");
        self.state = SessionState::Loaded {
            original: Arc::clone(&image),
            current: Arc::clone(&image),
            history,
        };
        Ok(image)
    }

    /// Decode `bytes` (JPEG or PNG) and load the result.
    ///
    /// # Errors
    ///
    /// `Decode` if the bytes cannot be decoded; the session is unchanged.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<Arc<Image>, EditError> {
        let image = decode_image(bytes)?;
        self.load(image)
    }

    /// Replace the current image with an already edited one.
    ///
    /// # Errors
    ///
    /// `EmptySession` if nothing is loaded, `InvalidImage` if `image` is empty
    /// or malformed.
    pub fn apply_edit(&mut self, image: Image) -> Result<Arc<Image>, EditError> {
        if !self.is_loaded() {
            return Err(EditError::EmptySession);
        }
        image.validate()?;
        self.commit(Arc::new(image))
    }

    /// Run `op` on the current image and commit the result.
    ///
    /// # Errors
    ///
    /// `EmptySession` if nothing is loaded, or the transform's own error. On
    /// error the session is unchanged.
    pub fn apply(&mut self, op: &EditOp) -> Result<Arc<Image>, EditError> {
        let edited = self.preview(op)?;
        debug!(op = op.name(), "applying edit");
        self.commit(Arc::new(edited))
    }

    /// Run `op` on the current image without committing it.
    pub fn preview(&self, op: &EditOp) -> Result<Image, EditError> {
        let current = self.current_ref()?;
        op.apply_with(current, self.config.interpolation)
    }

    /// Rotate by the configured rotate-tool step.
    pub fn rotate_step(&mut self) -> Result<Arc<Image>, EditError> {
        self.apply(&EditOp::Rotate {
            degrees: self.config.rotate_step,
        })
    }

    /// Step back to the previous image.
    ///
    /// # Errors
    ///
    /// `EmptySession` if nothing is loaded, `NoOpPossible` if there is
    /// nothing to undo. In both cases the current image is unchanged.
    pub fn undo(&mut self) -> Result<Arc<Image>, EditError> {
        match &mut self.state {
            SessionState::Empty => Err(EditError::EmptySession),
            SessionState::Loaded {
                current, history, ..
            } => {
                let previous = history.undo()?;
                *current = Arc::clone(&previous);
                debug!(cursor = history.cursor(), len = history.len(), "undo");
                Ok(previous)
            }
        }
    }

    /// The image being edited.
    pub fn current(&self) -> Option<Arc<Image>> {
        match &self.state {
            SessionState::Empty => None,
            SessionState::Loaded { current, .. } => Some(Arc::clone(current)),
        }
    }

    /// The image as it was loaded, before any edit.
    pub fn original(&self) -> Option<Arc<Image>> {
        match &self.state {
            SessionState::Empty => None,
            SessionState::Loaded { original, .. } => Some(Arc::clone(original)),
        }
    }

    pub fn history_len(&self) -> usize {
        match &self.state {
            SessionState::Empty => 0,
            SessionState::Loaded { history, .. } => history.len(),
        }
    }

    pub fn cursor(&self) -> usize {
        match &self.state {
            SessionState::Empty => 0,
            SessionState::Loaded { history, .. } => history.cursor(),
        }
    }

    pub fn can_undo(&self) -> bool {
        match &self.state {
            SessionState::Empty => false,
            SessionState::Loaded { history, .. } => history.can_undo(),
        }
    }

    /// Encode the current image as JPEG at the configured quality.
    pub fn export_jpeg(&self) -> Result<Vec<u8>, EditError> {
        let current = self.current_ref()?;
        let bytes = encode_jpeg(current, self.config.jpeg_quality)?;
        debug!(bytes = bytes.len(), quality = self.config.jpeg_quality, "exported jpeg");
        Ok(bytes)
    }

    fn current_ref(&self) -> Result<&Arc<Image>, EditError> {
        match &self.state {
            SessionState::Empty => Err(EditError::EmptySession),
            SessionState::Loaded { current, .. } => Ok(current),
        }
    }

    fn commit(&mut self, image: Arc<Image>) -> Result<Arc<Image>, EditError> {
        match &mut self.state {
            SessionState::Empty => Err(EditError::EmptySession),
            SessionState::Loaded {
                current, history, ..
            } => {
                history.push(Arc::clone(&image));
                *current = Arc::clone(&image);
                debug!(
                    width = image.width,
                    height = image.height,
                    history_len = history.len(),
                    "edit committed"
                );
                Ok(image)
            }
        }
    }
}

/// An [`EditSession`] behind a mutex, cloneable across threads.
///
/// Only one writer mutates the session at a time. [`SharedSession::apply`]
/// runs the transform without holding the lock and commits only if the
/// current image did not change meanwhile; if it did, the operation is run
/// again under the lock against the newer image, so the edit is never lost
/// and never applied to a stale image.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<EditSession>>,
}

impl SharedSession {
    pub fn new(session: EditSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    // A panic in another holder cannot leave the session half-updated, so a
    // poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, EditSession> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut EditSession) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn load(&self, image: Image) -> Result<Arc<Image>, EditError> {
        self.lock().load(image)
    }

    /// Decode outside the lock, then load.
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<Arc<Image>, EditError> {
        let image = decode_image(bytes)?;
        self.lock().load(image)
    }

    pub fn apply(&self, op: &EditOp) -> Result<Arc<Image>, EditError> {
        let (snapshot, interpolation) = {
            let session = self.lock();
            (
                session.current().ok_or(EditError::EmptySession)?,
                session.config.interpolation,
            )
        };

        let edited = op.apply_with(&snapshot, interpolation)?;

        let mut session = self.lock();
        match session.current() {
            Some(current) if Arc::ptr_eq(&current, &snapshot) => {
                debug!(op = op.name(), "applying edit");
                session.commit(Arc::new(edited))
            }
            _ => {
                debug!(op = op.name(), "current image changed during edit, reapplying");
                session.apply(op)
            }
        }
    }

    pub fn undo(&self) -> Result<Arc<Image>, EditError> {
        self.lock().undo()
    }

    pub fn current(&self) -> Option<Arc<Image>> {
        self.lock().current()
    }

    pub fn original(&self) -> Option<Arc<Image>> {
        self.lock().original()
    }

    pub fn history_len(&self) -> usize {
        self.lock().history_len()
    }

    /// Encode a snapshot of the current image outside the lock.
    pub fn export_jpeg(&self) -> Result<Vec<u8>, EditError> {
        let (current, quality) = {
            let session = self.lock();
            (
                session.current().ok_or(EditError::EmptySession)?,
                session.config.jpeg_quality,
            )
        };
        Ok(encode_jpeg(&current, quality)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Filter;
    use image::{DynamicImage, ImageFormat, RgbaImage};
    use std::io::Cursor;

    fn gradient(width: u32, height: u32) -> Image {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 64, 255]);
            }
        }
        Image::new(width, height, pixels)
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_empty_session_rejects_operations() {
        let mut session = EditSession::default();
        assert!(!session.is_loaded());
        assert!(session.current().is_none());
        assert!(matches!(
            session.apply(&EditOp::Rotate { degrees: 90.0 }),
            Err(EditError::EmptySession)
        ));
        assert!(matches!(
            session.apply_edit(Image::filled(1, 1, [0, 0, 0, 255])),
            Err(EditError::EmptySession)
        ));
        assert!(matches!(session.undo(), Err(EditError::EmptySession)));
        assert!(matches!(session.export_jpeg(), Err(EditError::EmptySession)));
        assert_eq!(session.history_len(), 0);
    }

    #[test]
    fn test_new_validates_config() {
        let config = EditorConfig {
            max_history: 0,
            ..Default::default()
        };
        assert!(EditSession::new(config).is_err());
    }

    #[test]
    fn test_square_crop_through_session() {
        let mut session = EditSession::default();
        session.load(gradient(800, 600)).unwrap();

        let cropped = session.apply(&EditOp::Crop { ratio: 1.0 }).unwrap();
        assert_eq!((cropped.width, cropped.height), (600, 600));
        assert_eq!(session.history_len(), 2);
        assert_eq!(session.cursor(), 1);

        let original = session.original().unwrap();
        assert_eq!((original.width, original.height), (800, 600));
        assert_eq!(cropped.pixel(0, 0), original.pixel(100, 0));
    }

    #[test]
    fn test_apply_then_undo_restores_previous() {
        let mut session = EditSession::default();
        let loaded = session.load(gradient(40, 30)).unwrap();

        session
            .apply(&EditOp::Filter {
                filter: Filter::Grayscale,
            })
            .unwrap();
        session.apply(&EditOp::Brightness { amount: 0.2 }).unwrap();
        assert_eq!(session.history_len(), 3);

        session.undo().unwrap();
        let restored = session.undo().unwrap();
        assert!(Arc::ptr_eq(&restored, &loaded));
        assert!(Arc::ptr_eq(&session.current().unwrap(), &loaded));

        assert!(matches!(session.undo(), Err(EditError::NoOpPossible)));
        assert!(Arc::ptr_eq(&session.current().unwrap(), &loaded));
    }

    #[test]
    fn test_edit_after_undo_appends_to_history() {
        let mut session = EditSession::default();
        session.load(gradient(8, 8)).unwrap();
        let b = session.apply(&EditOp::Brightness { amount: 0.1 }).unwrap();
        let c = session.apply(&EditOp::Brightness { amount: 0.2 }).unwrap();
        assert!(Arc::ptr_eq(&session.undo().unwrap(), &b));

        session.apply(&EditOp::Contrast { amount: 1.5 }).unwrap();
        assert_eq!(session.history_len(), 4);
        assert_eq!(session.cursor(), 3);
        assert!(Arc::ptr_eq(&session.undo().unwrap(), &c));
    }

    #[test]
    fn test_failed_edit_leaves_session_unchanged() {
        let mut session = EditSession::default();
        let loaded = session.load(gradient(10, 10)).unwrap();
        assert!(session.apply(&EditOp::Scale { factor: -1.0 }).is_err());
        assert_eq!(session.history_len(), 1);
        assert!(Arc::ptr_eq(&session.current().unwrap(), &loaded));
    }

    #[test]
    fn test_preview_does_not_commit() {
        let mut session = EditSession::default();
        session.load(gradient(20, 10)).unwrap();
        let preview = session.preview(&EditOp::Rotate { degrees: 90.0 }).unwrap();
        assert_eq!((preview.width, preview.height), (10, 20));
        assert_eq!(session.history_len(), 1);
        assert_eq!(session.current().unwrap().width, 20);
    }

    #[test]
    fn test_rotate_step_uses_config() {
        let mut session = EditSession::default();
        session.load(gradient(20, 10)).unwrap();
        let rotated = session.rotate_step().unwrap();
        assert_eq!((rotated.width, rotated.height), (10, 20));
    }

    #[test]
    fn test_history_bounded_but_original_kept() {
        let mut session = EditSession::default();
        let loaded = session.load(gradient(8, 8)).unwrap();
        for _ in 0..15 {
            session.apply(&EditOp::Brightness { amount: 0.01 }).unwrap();
        }
        assert_eq!(session.history_len(), 10);
        assert_eq!(session.cursor(), 9);
        assert!(Arc::ptr_eq(&session.original().unwrap(), &loaded));
    }

    #[test]
    fn test_apply_edit_shares_buffer_with_history() {
        let mut session = EditSession::default();
        session.load(gradient(4, 4)).unwrap();
        let edited = session.apply_edit(Image::filled(4, 4, [1, 2, 3, 255])).unwrap();
        let current = session.current().unwrap();
        assert!(Arc::ptr_eq(&edited, &current));
    }

    #[test]
    fn test_images_freed_with_session() {
        let mut session = EditSession::default();
        session.load(gradient(4, 4)).unwrap();
        session.apply(&EditOp::Contrast { amount: 1.5 }).unwrap();
        let current = session.current().unwrap();
        let original = session.original().unwrap();
        assert!(Arc::strong_count(&current) > 1);

        drop(session);
        assert_eq!(Arc::strong_count(&current), 1);
        assert_eq!(Arc::strong_count(&original), 1);
    }

    #[test]
    fn test_reload_resets_history() {
        let mut session = EditSession::default();
        session.load(gradient(4, 4)).unwrap();
        session.apply(&EditOp::Rotate { degrees: 90.0 }).unwrap();
        session.load(gradient(6, 6)).unwrap();
        assert_eq!(session.history_len(), 1);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_load_rejects_empty_image() {
        let mut session = EditSession::default();
        assert!(matches!(
            session.load(Image::new(0, 0, vec![])),
            Err(EditError::Decode(DecodeError::EmptyImage))
        ));
        assert!(!session.is_loaded());
        assert_eq!(session.history_len(), 0);
    }

    #[test]
    fn test_load_rejects_malformed_image_and_keeps_previous() {
        let mut session = EditSession::default();
        let loaded = session.load(gradient(4, 4)).unwrap();
        let short = Image {
            width: 4,
            height: 4,
            pixels: vec![0; 10],
        };
        assert!(matches!(
            session.load(short),
            Err(EditError::InvalidImage { len: 10, .. })
        ));
        assert!(Arc::ptr_eq(&session.current().unwrap(), &loaded));
    }

    #[test]
    fn test_apply_edit_rejects_empty_image() {
        let mut session = EditSession::default();
        session.load(gradient(4, 4)).unwrap();
        assert!(session.apply_edit(Image::new(0, 0, vec![])).is_err());
        assert_eq!(session.history_len(), 1);
    }

    #[test]
    fn test_shared_load_rejects_empty_image() {
        let shared = SharedSession::default();
        assert!(shared.load(Image::new(0, 3, vec![])).is_err());
        assert!(shared.current().is_none());
    }

    #[test]
    fn test_load_bytes() {
        let mut session = EditSession::default();
        let loaded = session.load_bytes(&png_bytes(12, 8)).unwrap();
        assert_eq!((loaded.width, loaded.height), (12, 8));
        assert_eq!(loaded.pixel(0, 0), [10, 20, 30, 255]);
    }

    #[test]
    fn test_load_bytes_failure_keeps_previous_image() {
        let mut session = EditSession::default();
        let loaded = session.load(gradient(5, 5)).unwrap();
        let err = session.load_bytes(b"not an image").unwrap_err();
        assert!(matches!(err, EditError::Decode(_)));
        assert!(Arc::ptr_eq(&session.current().unwrap(), &loaded));
    }

    #[test]
    fn test_export_jpeg() {
        let mut session = EditSession::default();
        session.load(gradient(16, 16)).unwrap();
        let bytes = session.export_jpeg().unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_shared_session_across_threads() {
        let shared = SharedSession::default();
        shared.load(gradient(10, 10)).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    shared.apply(&EditOp::Brightness { amount: 0.01 }).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.history_len(), 5);
        shared.undo().unwrap();
        assert_eq!(shared.with(|s| s.cursor()), 3);
    }

    #[test]
    fn test_shared_session_empty() {
        let shared = SharedSession::default();
        assert!(matches!(
            shared.apply(&EditOp::Crop { ratio: 1.0 }),
            Err(EditError::EmptySession)
        ));
        assert!(matches!(shared.export_jpeg(), Err(EditError::EmptySession)));
    }
}
