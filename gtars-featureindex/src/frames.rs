use gtars_core::models::{Exon, Strand};

/// Direction in which a transcript's exons are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Traversal {
    Forward,
    Reverse,
}

impl Traversal {
    fn for_strand(strand: Strand) -> Self {
        match strand {
            Strand::Minus => Traversal::Reverse,
            Strand::Plus | Strand::Unstranded => Traversal::Forward,
        }
    }
}

/// Number exons in transcription order and assign each coding exon a reading frame.
///
/// `exons` must be in genomic order. On the minus strand they are walked back to
/// front, so the last exon in the slice is exon 1.
///
/// Leading exons without coding bases get a number but no frame. From the first coding
/// exon on, every exon's frame is the number of coding bases before it, mod 3.
/// Unstranded transcripts have no transcription direction: exons are numbered in slice
/// order and no frames are assigned.
pub fn compute_reading_frames(exons: &mut [Exon], strand: Strand) {
    let ordered: Box<dyn Iterator<Item = &mut Exon>> = match Traversal::for_strand(strand) {
        Traversal::Forward => Box::new(exons.iter_mut()),
        Traversal::Reverse => Box::new(exons.iter_mut().rev()),
    };
    let assign_frames = strand != Strand::Unstranded;

    let mut cds: u64 = 0;
    for (i, exon) in ordered.enumerate() {
        exon.number = Some(i as u32 + 1);
        exon.reading_frame = None;

        if !assign_frames {
            continue;
        }

        let coding_length = exon.coding_length() as u64;
        // skip until the coding start
        if coding_length > 0 || cds > 0 {
            exon.reading_frame = Some((cds % 3) as u8);
            cds += coding_length;
        }
    }
}
