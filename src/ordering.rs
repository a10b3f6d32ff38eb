//! Sample sequencing strategies.
//!
//! The order in which computed samples reach the output stream is a
//! user-selectable mode, not an implementation detail. All four modes emit
//! exactly the appended sample count in pixel scan order; they differ in the
//! transient bookkeeping holding the samples between the mapping pass and
//! the write pass. Array mode is the only one without per-sample node
//! allocation and is the right choice for large images.

use std::io::{self, Write};
use std::ptr;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::ConvertError;

/// Sample emission order policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingMode {
    /// Contiguous buffer written in one scan-order pass.
    #[default]
    Array,
    /// Singly-linked chain appended at the tail.
    List,
    /// Push at the head, re-reversed in place before writing.
    Stack,
    /// Tracked head and tail, O(1) append.
    Queue,
}

struct Node {
    value: i16,
    next: Option<Box<Node>>,
}

/// Owning head of a sample node chain.
///
/// Nodes only exist between the mapping pass and the write pass; writing
/// consumes and releases them one at a time.
struct Chain {
    head: Option<Box<Node>>,
}

impl Chain {
    fn new() -> Self {
        Self { head: None }
    }

    fn push_front(&mut self, value: i16) {
        self.head = Some(Box::new(Node {
            value,
            next: self.head.take(),
        }));
    }

    /// Append at the tail by walking the chain.
    fn push_back(&mut self, value: i16) {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node { value, next: None }));
    }

    /// Reverse the chain in place.
    fn reverse(&mut self) {
        let mut reversed = None;
        while let Some(mut node) = self.head.take() {
            self.head = node.next.take();
            node.next = reversed.take();
            reversed = Some(node);
        }
        self.head = reversed;
    }

    /// Write every value head-to-tail, releasing each node as it goes.
    fn write_out<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        while let Some(mut node) = self.head.take() {
            self.head = node.next.take();
            out.write_i16::<LittleEndian>(node.value)?;
        }
        Ok(())
    }
}

impl Drop for Chain {
    // Unlink iteratively; a recursive drop would overflow the stack on
    // chains the size of a real image.
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

/// Singly-linked sample sequence appended at the tail.
pub struct SampleList {
    chain: Chain,
    len: usize,
}

impl SampleList {
    pub fn new() -> Self {
        Self {
            chain: Chain::new(),
            len: 0,
        }
    }

    pub fn append(&mut self, value: i16) {
        self.chain.push_back(value);
        self.len += 1;
    }
}

/// LIFO sample sequence; pushing reverses scan order.
pub struct SampleStack {
    chain: Chain,
    len: usize,
}

impl SampleStack {
    pub fn new() -> Self {
        Self {
            chain: Chain::new(),
            len: 0,
        }
    }

    pub fn push(&mut self, value: i16) {
        self.chain.push_front(value);
        self.len += 1;
    }
}

/// FIFO sample sequence with O(1) tail append.
pub struct SampleQueue {
    chain: Chain,
    tail: *mut Node,
    len: usize,
}

impl SampleQueue {
    pub fn new() -> Self {
        Self {
            chain: Chain::new(),
            tail: ptr::null_mut(),
            len: 0,
        }
    }

    pub fn enqueue(&mut self, value: i16) {
        let mut node = Box::new(Node { value, next: None });
        let raw: *mut Node = &mut *node;
        if self.tail.is_null() {
            self.chain.head = Some(node);
        } else {
            // SAFETY: `tail` points at the last node of the chain owned by
            // `chain.head` and is nulled whenever the chain is emptied.
            unsafe { (*self.tail).next = Some(node) };
        }
        self.tail = raw;
        self.len += 1;
    }
}

/// A sequencer accumulates mapped samples and drains them to a writer in
/// the order its mode defines.
pub enum Sequencer {
    Array(Vec<i16>),
    List(SampleList),
    Stack(SampleStack),
    Queue(SampleQueue),
}

impl Sequencer {
    /// `capacity` is reserved up front in array mode only; the node-based
    /// modes allocate per sample.
    pub fn with_mode(mode: OrderingMode, capacity: usize) -> Result<Self, ConvertError> {
        Ok(match mode {
            OrderingMode::Array => {
                let mut samples = Vec::new();
                samples.try_reserve_exact(capacity)?;
                Sequencer::Array(samples)
            }
            OrderingMode::List => Sequencer::List(SampleList::new()),
            OrderingMode::Stack => Sequencer::Stack(SampleStack::new()),
            OrderingMode::Queue => Sequencer::Queue(SampleQueue::new()),
        })
    }

    pub fn append(&mut self, sample: i16) {
        match self {
            Sequencer::Array(samples) => samples.push(sample),
            Sequencer::List(list) => list.append(sample),
            Sequencer::Stack(stack) => stack.push(sample),
            Sequencer::Queue(queue) => queue.enqueue(sample),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Sequencer::Array(samples) => samples.len(),
            Sequencer::List(list) => list.len,
            Sequencer::Stack(stack) => stack.len,
            Sequencer::Queue(queue) => queue.len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write every accumulated sample as little-endian i16 and release the
    /// backing storage. The final on-disk order equals scan order in every
    /// mode: the stack re-reverses its chain before writing.
    pub fn drain_to<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        match self {
            Sequencer::Array(samples) => {
                for &sample in samples.iter() {
                    out.write_i16::<LittleEndian>(sample)?;
                }
                samples.clear();
            }
            Sequencer::List(list) => {
                list.chain.write_out(out)?;
                list.len = 0;
            }
            Sequencer::Stack(stack) => {
                stack.chain.reverse();
                stack.chain.write_out(out)?;
                stack.len = 0;
            }
            Sequencer::Queue(queue) => {
                queue.tail = ptr::null_mut();
                queue.chain.write_out(out)?;
                queue.len = 0;
            }
        }
        Ok(())
    }
}
