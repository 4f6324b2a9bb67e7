//! The fixed venue list and historical container-title resolution.

/// A publication venue, stable across historical name changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Venue {
    Icse,
    Tse,
    Jss,
    Ist,
    Emse,
    Fse,
    Ase,
    Tosem,
}

impl Venue {
    /// Collection order. The ranking sequence number follows this order
    /// within each year.
    pub const ALL: [Venue; 8] = [
        Venue::Icse,
        Venue::Tse,
        Venue::Jss,
        Venue::Ist,
        Venue::Emse,
        Venue::Fse,
        Venue::Ase,
        Venue::Tosem,
    ];

    pub fn acronym(self) -> &'static str {
        match self {
            Venue::Icse => "ICSE",
            Venue::Tse => "TSE",
            Venue::Jss => "JSS",
            Venue::Ist => "IST",
            Venue::Emse => "EMSE",
            Venue::Fse => "FSE",
            Venue::Ase => "ASE",
            Venue::Tosem => "TOSEM",
        }
    }

    /// Whether the container title depends on the year. An empty ranking for
    /// such a venue means the title mapping has drifted and the run must fail.
    pub fn year_dependent(self) -> bool {
        matches!(self, Venue::Fse)
    }

    /// The literal container title expected in metadata records for `year`.
    ///
    /// FSE's official name alternates with year parity, and the convention
    /// itself changed at the 2018 boundary; odd years from 2018 on carry the
    /// joint ESEC/FSE name. This table is conference renaming history, not an
    /// algorithm.
    pub fn container_title(self, year: i32) -> &'static str {
        match self {
            Venue::Icse => "International Conference on Software Engineering",
            Venue::Tse => "IEEE Transactions on Software Engineering",
            Venue::Jss => "Journal of Systems and Software",
            Venue::Ist => "Information and Software Technology",
            Venue::Emse => "Empirical Software Engineering",
            Venue::Ase => "International Conference on Automated Software Engineering",
            Venue::Tosem => "ACM Transactions on Software Engineering and Methodology",
            Venue::Fse => {
                if year % 2 == 0 {
                    if year < 2018 {
                        "Symposium on Foundations of Software Engineering"
                    } else {
                        "Symposium on the Foundations of Software Engineering"
                    }
                } else if year < 2018 {
                    "Meeting on Foundations of Software Engineering"
                } else {
                    "European Software Engineering Conference and Symposium on the Foundations of Software Engineering"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fse_even_before_2018() {
        assert_eq!(
            Venue::Fse.container_title(2016),
            "Symposium on Foundations of Software Engineering"
        );
        assert_eq!(
            Venue::Fse.container_title(2014),
            "Symposium on Foundations of Software Engineering"
        );
    }

    #[test]
    fn fse_odd_before_2018() {
        assert_eq!(
            Venue::Fse.container_title(2017),
            "Meeting on Foundations of Software Engineering"
        );
        assert_eq!(
            Venue::Fse.container_title(2013),
            "Meeting on Foundations of Software Engineering"
        );
    }

    #[test]
    fn fse_even_from_2018() {
        assert_eq!(
            Venue::Fse.container_title(2018),
            "Symposium on the Foundations of Software Engineering"
        );
        assert_eq!(
            Venue::Fse.container_title(2020),
            "Symposium on the Foundations of Software Engineering"
        );
    }

    #[test]
    fn fse_odd_from_2018_is_joint_name() {
        assert_eq!(
            Venue::Fse.container_title(2019),
            "European Software Engineering Conference and Symposium on the Foundations of Software Engineering"
        );
        assert_eq!(
            Venue::Fse.container_title(2023),
            "European Software Engineering Conference and Symposium on the Foundations of Software Engineering"
        );
    }

    #[test]
    fn other_venues_are_year_independent() {
        for venue in Venue::ALL {
            if venue == Venue::Fse {
                continue;
            }
            assert_eq!(venue.container_title(2013), venue.container_title(2023));
        }
        assert_eq!(
            Venue::Icse.container_title(2022),
            "International Conference on Software Engineering"
        );
        assert_eq!(
            Venue::Tse.container_title(2015),
            "IEEE Transactions on Software Engineering"
        );
    }

    #[test]
    fn only_fse_is_year_dependent() {
        for venue in Venue::ALL {
            assert_eq!(venue.year_dependent(), venue == Venue::Fse);
        }
    }
}
