pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{address_builder::*, placemark_builder::*};

pub mod placemark_builder {

    use super::*;
    use crate::{address::*, geo::*, placemark::*};

    #[derive(Debug)]
    pub struct PlacemarkBuild {
        placemark: Placemark,
    }

    impl PlacemarkBuild {
        pub fn pos(mut self, pos: Coordinate) -> Self {
            self.placemark.pos = Some(pos);
            self
        }
        pub fn lat_lng(self, lat: f64, lng: f64) -> Self {
            self.pos(Coordinate::from_lat_lng_deg(lat, lng))
        }
        pub fn address(mut self, address: Address) -> Self {
            self.placemark.address = address;
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.placemark.name = Some(name.into());
            self
        }
        pub fn finish(self) -> Placemark {
            self.placemark
        }
    }

    impl Builder for Placemark {
        type Build = PlacemarkBuild;
        fn build() -> PlacemarkBuild {
            PlacemarkBuild {
                placemark: Placemark::default(),
            }
        }
    }
}

pub mod address_builder {

    use super::*;
    use crate::address::*;

    #[derive(Debug)]
    pub struct AddressBuild {
        addr: Address,
    }

    impl AddressBuild {
        pub fn locality(mut self, x: &str) -> Self {
            self.addr.locality = Some(x.into());
            self
        }
        pub fn admin_area(mut self, x: &str) -> Self {
            self.addr.admin_area = Some(x.into());
            self
        }
        pub fn country(mut self, x: &str) -> Self {
            self.addr.country = Some(x.into());
            self
        }
        pub fn finish(self) -> Address {
            self.addr
        }
    }

    impl Builder for Address {
        type Build = AddressBuild;
        fn build() -> Self::Build {
            AddressBuild {
                addr: Address::default(),
            }
        }
    }

    #[test]
    fn empty_address() {
        assert!(Address::default().is_empty());
        assert!(!Address::build().locality("x").finish().is_empty());
        assert!(!Address::build().admin_area("x").finish().is_empty());
        assert!(!Address::build().country("x").finish().is_empty());
    }
}
