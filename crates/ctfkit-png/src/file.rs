//! PNG container handling.

use std::fs::File;
use std::ops::Deref;
use std::path::Path;

use log::debug;
use memmap2::Mmap;

use crate::signature::{self, SIGNATURE_LEN};
use crate::walker::{self, ChunkIter, WalkHalt};
use crate::{codec, Chunk, ChunkType, Error, ParseOptions, Result};

/// Backing storage for a container. Read-only for its whole lifetime.
enum Buffer {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl Deref for Buffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Buffer::Owned(v) => v.as_slice(),
            Buffer::Mapped(m) => &m[..],
        }
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Buffer::Owned(v) => write!(f, "Owned({} bytes)", v.len()),
            Buffer::Mapped(m) => write!(f, "Mapped({} bytes)", m.len()),
        }
    }
}

/// A PNG container: the raw bytes, the cached signature and the parsed chunk list.
///
/// Loading only checks that the signature can be formed; whether it is valid is
/// a separate query, so files with a corrupted signature can still be walked.
///
/// # Example
///
/// ```
/// use ctfkit_png::{codec, ChunkType, ParseOptions, PngFile, PNG_SIGNATURE};
///
/// let mut bytes = PNG_SIGNATURE.to_vec();
/// bytes.extend(codec::encode(ChunkType::IEND, b"", *b"AB12")?);
///
/// let mut png = PngFile::load(bytes, ParseOptions::strict())?;
/// assert!(png.validate_signature());
/// assert!(png.process_chunks()?);
/// assert_eq!(png.chunks()[0].chunk_type, ChunkType::IEND);
/// # Ok::<(), ctfkit_png::Error>(())
/// ```
#[derive(Debug)]
pub struct PngFile {
    buffer: Buffer,
    header: [u8; SIGNATURE_LEN],
    chunks: Vec<Chunk>,
    halt: Option<WalkHalt>,
    options: ParseOptions,
}

impl PngFile {
    /// Take ownership of an in-memory buffer.
    pub fn load(data: Vec<u8>, options: ParseOptions) -> Result<Self> {
        Self::from_buffer(Buffer::Owned(data), options)
    }

    /// Copy a byte slice into a new container.
    pub fn from_slice(data: &[u8], options: ParseOptions) -> Result<Self> {
        Self::load(data.to_vec(), options)
    }

    /// Memory-map a file read-only.
    pub fn open<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;

        let size = file.metadata()?.len();
        if size < SIGNATURE_LEN as u64 {
            return Err(Error::EmptyInput {
                size: size as usize,
            });
        }

        // SAFETY: the map is read-only; concurrent truncation by another
        // process is outside what we can defend against.
        let mmap = unsafe { Mmap::map(&file)? };
        debug!("mapped {} ({} bytes)", path.display(), mmap.len());

        Self::from_buffer(Buffer::Mapped(mmap), options)
    }

    fn from_buffer(buffer: Buffer, options: ParseOptions) -> Result<Self> {
        let header: [u8; SIGNATURE_LEN] = buffer
            .get(..SIGNATURE_LEN)
            .and_then(|h| h.try_into().ok())
            .ok_or(Error::EmptyInput { size: buffer.len() })?;

        Ok(Self {
            buffer,
            header,
            chunks: Vec::new(),
            halt: None,
            options,
        })
    }

    /// The whole underlying buffer.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Buffer size in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// The first eight bytes, as loaded.
    #[inline]
    pub fn header(&self) -> &[u8; SIGNATURE_LEN] {
        &self.header
    }

    /// Options this container was created with.
    #[inline]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Whether the strict failure policy is active.
    #[inline]
    pub fn is_strict(&self) -> bool {
        self.options.strict
    }

    /// Check the cached header against the PNG signature.
    pub fn validate_signature(&self) -> bool {
        signature::validate(&self.header)
    }

    /// Walk every chunk after the signature, replacing any previous result.
    ///
    /// Returns `Ok(true)` if at least one chunk was collected. In strict mode
    /// the first decode failure is returned as an error and the chunk list is
    /// left empty. In lenient mode a failure ends the walk quietly; the chunks
    /// before it are kept and the failure is available from [`halt`](Self::halt).
    pub fn process_chunks(&mut self) -> Result<bool> {
        self.chunks.clear();
        self.halt = None;

        let walk = walker::walk(&self.buffer, &self.options)?;
        self.chunks = walk.chunks;
        self.halt = walk.halt;

        Ok(!self.chunks.is_empty())
    }

    /// Chunks from the last [`process_chunks`](Self::process_chunks), in file order.
    #[inline]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Why the last lenient walk stopped before the end of the buffer, if it did.
    #[inline]
    pub fn halt(&self) -> Option<&WalkHalt> {
        self.halt.as_ref()
    }

    /// Decode a single chunk at an arbitrary offset.
    ///
    /// Independent of the stored chunk list; any number of these calls can be
    /// made before, between or after walks without affecting them.
    pub fn extract_chunk_at(&self, offset: usize) -> Result<Chunk> {
        Ok(codec::decode(&self.buffer, offset, &self.options)?)
    }

    /// Lazily iterate chunks after the signature without storing them.
    pub fn iter_chunks(&self) -> ChunkIter<'_> {
        ChunkIter::after_signature(&self.buffer, &self.options)
    }

    /// Processed chunks of one type.
    pub fn chunks_of_type(&self, chunk_type: ChunkType) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter().filter(move |c| c.chunk_type == chunk_type)
    }

    /// The first processed chunk of one type.
    pub fn first_chunk_of_type(&self, chunk_type: ChunkType) -> Option<&Chunk> {
        self.chunks_of_type(chunk_type).next()
    }

    /// Bytes after the last processed chunk that no chunk accounts for.
    ///
    /// Data appended after `IEND`, or the unreadable tail of a truncated file.
    pub fn trailing_bytes(&self) -> usize {
        let end = self
            .chunks
            .last()
            .map_or(SIGNATURE_LEN, Chunk::end_offset);
        self.size().saturating_sub(end)
    }
}
