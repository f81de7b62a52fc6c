//! Fixed-width unsigned big integer used for exact float-to-decimal output.
//!
//! Sized for the whole f64 range: the integer part of `f64::MAX` needs 1024
//! bits and the fractional numerator of the smallest subnormal, times ten,
//! needs 1078 bits. Limbs at index `len` and above are always zero.

const LIMBS: usize = 40;

#[derive(Clone, Debug)]
pub(crate) struct Big {
    limbs: [u32; LIMBS],
    len: usize,
}

impl Big {
    pub(crate) const fn zero() -> Self {
        Self {
            limbs: [0; LIMBS],
            len: 0,
        }
    }

    pub(crate) fn from_u64(value: u64) -> Self {
        let mut big = Self::zero();
        big.limbs[0] = value as u32;
        big.limbs[1] = (value >> 32) as u32;
        big.len = 2;
        big.trim();
        big
    }

    #[inline]
    pub(crate) fn is_zero(&self) -> bool {
        self.len == 0
    }

    fn trim(&mut self) {
        while self.len > 0 && self.limbs[self.len - 1] == 0 {
            self.len -= 1;
        }
    }

    pub(crate) fn shl(&mut self, bits: usize) {
        if self.is_zero() || bits == 0 {
            return;
        }
        let limb_shift = bits / 32;
        let bit_shift = bits % 32;
        debug_assert!(self.len + limb_shift < LIMBS);

        let mut out = [0u32; LIMBS];
        for i in 0..self.len {
            let wide = (self.limbs[i] as u64) << bit_shift;
            let dst = i + limb_shift;
            out[dst] |= wide as u32;
            if dst + 1 < LIMBS {
                out[dst + 1] |= (wide >> 32) as u32;
            }
        }
        self.limbs = out;
        self.len = (self.len + limb_shift + 1).min(LIMBS);
        self.trim();
    }

    pub(crate) fn mul_small(&mut self, factor: u32) {
        let mut carry = 0u64;
        for limb in &mut self.limbs[..self.len] {
            let wide = (*limb as u64) * (factor as u64) + carry;
            *limb = wide as u32;
            carry = wide >> 32;
        }
        if carry != 0 {
            debug_assert!(self.len < LIMBS);
            self.limbs[self.len] = carry as u32;
            self.len += 1;
        }
    }

    /// Divide in place by `divisor`, returning the remainder.
    pub(crate) fn divrem_small(&mut self, divisor: u32) -> u32 {
        let mut rem = 0u64;
        for limb in self.limbs[..self.len].iter_mut().rev() {
            let cur = (rem << 32) | (*limb as u64);
            *limb = (cur / divisor as u64) as u32;
            rem = cur % divisor as u64;
        }
        self.trim();
        rem as u32
    }

    /// Remove and return everything at or above bit `bit`.
    ///
    /// The removed part must fit in 32 bits once shifted down, which holds
    /// for a fraction numerator below `2^bit` that was multiplied by 10.
    pub(crate) fn take_above(&mut self, bit: usize) -> u32 {
        let li = bit / 32;
        let off = bit % 32;
        if li >= self.len {
            return 0;
        }

        let next = if li + 1 < self.len { self.limbs[li + 1] } else { 0 };
        let window = (self.limbs[li] as u64) | ((next as u64) << 32);
        let high = (window >> off) as u32;

        self.limbs[li] &= if off == 0 { 0 } else { (1u32 << off) - 1 };
        for limb in &mut self.limbs[li + 1..self.len] {
            *limb = 0;
        }
        self.len = li + 1;
        self.trim();
        high
    }
}
